//! Calldata builders for `manage` and `manageBatch`.
//!
//! `manage` forwards arbitrary calldata from the vault to a target
//! contract. These helpers produce that calldata: a typed path through
//! `sol!` call structs for the common ERC-20 / ERC-4626 operations, and
//! a dynamic path that takes human-readable signatures for anything else.
//!
//! The vault decides whether the call is allowed. Nothing here checks
//! authorization or target allow-lists.

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use thiserror::Error;

use crate::abi::{IERC20, IERC4626};

/// Errors raised while encoding calldata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A signature string could not be parsed.
    #[error("invalid function signature {signature:?}: {reason}")]
    InvalidSignature {
        /// The offending signature.
        signature: String,
        /// Parser message.
        reason: String,
    },

    /// No signature matched the requested name and argument count.
    #[error("no function {name} taking {arity} argument(s) in the given signatures")]
    UnknownFunction {
        /// Requested function name.
        name: String,
        /// Number of arguments supplied.
        arity: usize,
    },

    /// The arguments did not fit the function's parameter types.
    #[error("abi encoding failed: {0}")]
    Abi(String),
}

/// Encodes a typed call (selector + arguments).
pub fn encode_call<C: SolCall>(call: &C) -> Bytes {
    call.abi_encode().into()
}

/// Encodes a call described by human-readable signatures.
///
/// `signatures` are Solidity declarations such as
/// `"function approve(address spender, uint256 amount) returns (bool)"`.
/// The first one whose name is `function_name` and whose parameter count
/// equals `args.len()` is used, which is enough to pick between
/// overloads of different arity.
pub fn encode_manage_call(
    signatures: &[&str],
    function_name: &str,
    args: &[DynSolValue],
) -> Result<Bytes, EncodeError> {
    for signature in signatures {
        let function = Function::parse(signature).map_err(|e| EncodeError::InvalidSignature {
            signature: signature.to_string(),
            reason: e.to_string(),
        })?;
        if function.name != function_name || function.inputs.len() != args.len() {
            continue;
        }
        let data = function
            .abi_encode_input(args)
            .map_err(|e| EncodeError::Abi(e.to_string()))?;
        return Ok(data.into());
    }

    Err(EncodeError::UnknownFunction {
        name: function_name.to_string(),
        arity: args.len(),
    })
}

/// `IERC20.approve(spender, amount)`.
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    encode_call(&IERC20::approveCall { spender, amount })
}

/// `IERC20.transfer(to, amount)`.
pub fn encode_transfer(to: Address, amount: U256) -> Bytes {
    encode_call(&IERC20::transferCall { to, amount })
}

/// `IERC4626.deposit(assets, receiver)`.
pub fn encode_erc4626_deposit(assets: U256, receiver: Address) -> Bytes {
    encode_call(&IERC4626::depositCall { assets, receiver })
}

/// `IERC4626.withdraw(assets, receiver, owner)`.
pub fn encode_erc4626_withdraw(assets: U256, receiver: Address, owner: Address) -> Bytes {
    encode_call(&IERC4626::withdrawCall {
        assets,
        receiver,
        owner,
    })
}

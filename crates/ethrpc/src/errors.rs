use alloy::{
    contract::Error as ContractError,
    transports::{RpcError, TransportError},
};

pub trait ContractErrorExt {
    /// Returns whether a given error is a contract error, this is considered to
    /// be all errors except the transport error where there is no revert data.
    fn is_contract_error(&self) -> bool;

    /// Returns whether a given error is a node error.
    fn is_node_error(&self) -> bool;
}

impl ContractErrorExt for ContractError {
    fn is_contract_error(&self) -> bool {
        !self.is_node_error()
    }

    fn is_node_error(&self) -> bool {
        // In alloy some contract errors are "hidden" inside transport errors, so
        // an error response only counts as a node error if it carries no revert
        // data. Alloy's own decoding can't be used here because it reports empty
        // revert data the same way as missing revert data.
        match self {
            ContractError::TransportError(RpcError::ErrorResp(err)) => {
                let no_revert_data = err.as_revert_data().is_none();
                tracing::debug!(?err, %no_revert_data, "transport rpc error");
                no_revert_data
            }
            ContractError::TransportError(_) => true,
            _ => false,
        }
    }
}

pub trait TransportErrorExt {
    /// Returns whether the node received the request and answered it with an
    /// error (e.g. a transaction failing gas estimation or lacking funds), as
    /// opposed to the request never getting a well formed answer.
    fn is_rejection(&self) -> bool;
}

impl TransportErrorExt for TransportError {
    fn is_rejection(&self) -> bool {
        matches!(self, RpcError::ErrorResp(_))
    }
}

/// Create an arbitrary alloy error that will convert into a "contract" error.
/// Useful for testing.
#[cfg(test)]
pub fn testing_alloy_contract_error() -> ContractError {
    ContractError::NotADeploymentTransaction
}

/// Create an arbitrary alloy error that will convert into a "node" error.
/// Useful for testing.
#[cfg(test)]
pub fn testing_alloy_node_error() -> ContractError {
    ContractError::TransportError(TransportError::ErrorResp(
        alloy::rpc::json_rpc::ErrorPayload::internal_error(),
    ))
}

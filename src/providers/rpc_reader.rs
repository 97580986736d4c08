use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::models::address::Address;
use crate::models::token::TokenId;
use crate::traits::contract_reader::NftContractReader;
use crate::utils::abi;

/// JSON-RPC response envelope for `eth_call`
#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// `eth_call`-based contract reader against a configured JSON-RPC endpoint
pub struct JsonRpcContractReader {
    client: Client,
    rpc_url: String,
}

impl JsonRpcContractReader {
    pub fn new(rpc_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build RPC HTTP client")?;

        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
        })
    }

    async fn eth_call(&self, contract: &Address, data: String) -> Result<String> {
        debug!("eth_call {} data {}", contract, data);

        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [{ "to": contract.as_str(), "data": data }, "latest"],
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await
            .context("eth_call request failed")?;

        if !response.status().is_success() {
            bail!("RPC endpoint returned status {}", response.status());
        }

        let body: RpcResponse = response
            .json()
            .await
            .context("invalid JSON-RPC response")?;

        if let Some(err) = body.error {
            bail!("RPC error {}: {}", err.code, err.message);
        }
        body.result
            .ok_or_else(|| anyhow!("JSON-RPC response missing result"))
    }
}

#[async_trait]
impl NftContractReader for JsonRpcContractReader {
    async fn name(&self, contract: &Address) -> Result<String> {
        let result = self
            .eth_call(contract, abi::calldata(abi::SEL_NAME, &[]))
            .await?;
        abi::decode_string(&result)
    }

    async fn symbol(&self, contract: &Address) -> Result<String> {
        let result = self
            .eth_call(contract, abi::calldata(abi::SEL_SYMBOL, &[]))
            .await?;
        abi::decode_string(&result)
    }

    async fn balance_of(&self, contract: &Address, owner: &Address) -> Result<u64> {
        let data = abi::calldata(abi::SEL_BALANCE_OF, &[abi::encode_address(owner.as_str())]);
        let result = self.eth_call(contract, data).await?;
        let value = abi::decode_uint(&result)?;
        u64::try_from(value).map_err(|_| anyhow!("token balance {} exceeds u64", value))
    }

    async fn token_of_owner_by_index(
        &self,
        contract: &Address,
        owner: &Address,
        index: u64,
    ) -> Result<TokenId> {
        let data = abi::calldata(
            abi::SEL_TOKEN_OF_OWNER_BY_INDEX,
            &[
                abi::encode_address(owner.as_str()),
                abi::encode_uint(index as u128),
            ],
        );
        let result = self.eth_call(contract, data).await?;
        Ok(TokenId(abi::decode_uint(&result)?))
    }

    async fn token_uri(&self, contract: &Address, token_id: TokenId) -> Result<String> {
        let data = abi::calldata(abi::SEL_TOKEN_URI, &[abi::encode_uint(token_id.0)]);
        let result = self.eth_call(contract, data).await?;
        abi::decode_string(&result)
    }
}

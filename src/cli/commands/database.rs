use reqwest::Method;

use crate::cli::client::GatewayClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn flush(client: &GatewayClient, name: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let builder = client
        .request(Method::GET, "/database/flush")
        .query(&[("name", name)]);

    let result = client.send(builder).await?;
    output_success(output_format, &format!("Flushed database '{}'", name), &result)
}

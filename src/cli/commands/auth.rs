use reqwest::Method;

use crate::cli::client::GatewayClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn login(
    client: &GatewayClient,
    username: &str,
    password: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let builder = client
        .request(Method::POST, "/login")
        .form(&[("username", username), ("password", password)]);

    let token = client.send(builder).await?;
    output_success(output_format, "Logged in; pass the token with --token", &token)
}

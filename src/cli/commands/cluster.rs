use reqwest::Method;

use crate::cli::client::GatewayClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn master(client: &GatewayClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let status = client.send(client.request(Method::GET, "/cluster/master")).await?;

    let message = match status["master"].as_object() {
        Some(master) => format!(
            "Master is {}:{}{}",
            master.get("ip").and_then(|v| v.as_str()).unwrap_or("?"),
            master.get("port").and_then(|v| v.as_u64()).unwrap_or(0),
            if status["is_self"] == true { " (this node)" } else { "" }
        ),
        None => "No master elected".to_string(),
    };
    output_success(output_format, &message, &status)
}

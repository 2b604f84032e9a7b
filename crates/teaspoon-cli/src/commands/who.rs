use teaspoon_core::WhoIs;

use crate::commands::common::{build_client, ResolvedSettings};
use crate::error::CliError;

pub async fn run_who(as_json: bool, settings: &ResolvedSettings) -> Result<(), CliError> {
    let client = build_client(settings)?;
    tracing::debug!(server_url = %settings.server_url, path = %settings.submit.who_path, "Fetching identity");
    let who = client.fetch_who(&settings.submit.who_path).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&who)?);
    } else {
        println!("{}", format_who(&who));
    }
    Ok(())
}

/// One line, in the same words the server's page uses.
pub fn format_who(who: &WhoIs) -> String {
    format!(
        "You are {} from {} ({})",
        who.login_name, who.node_name, who.remote_addr
    )
}

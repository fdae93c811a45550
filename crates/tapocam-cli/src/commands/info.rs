//! `info` command handler.

use tapocam_api::TapoClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(client: &TapoClient, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.get_info().await?;
    output::print_info(&info, global.output)
}

use crate::*;

pub fn handle_info_commands(cli: &Cli, cfg: &Config) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Keywords => {
            print_out(cli.json, &VALID_KEYWORDS, |k| k.to_string())?;
        }
        Commands::Config => {
            print_one(cli.json, cfg, |c| {
                vec![
                    format!("metadata.endpoint_url: {}", c.metadata.endpoint_url),
                    format!("metadata.timeout_secs: {}", c.metadata.timeout_secs),
                    format!("release.admin_user_id: {}", c.release.admin_user_id),
                ]
            })?;
        }
        Commands::Run { .. } => {}
    }
    Ok(())
}

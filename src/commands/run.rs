use crate::*;

pub fn handle_run_command(cli: &Cli, cfg: &Config) -> anyhow::Result<()> {
    let Commands::Run {
        keyword,
        time_ago,
        time_after,
        exclude,
    } = &cli.command
    else {
        return Ok(());
    };

    let request = ReleaseRequest {
        keyword: keyword.clone(),
        time_ago: *time_ago,
        time_after: *time_after,
        exclude: exclude.clone(),
    };
    let client = MetadataClient::new(&cfg.metadata)?;
    let report = data_release(&client, &cfg.release, &request, now())?;

    print_one(cli.json, report, |r| {
        let mut lines = vec![format!("keyword: {}", r.keyword)];
        for u in &r.suspense_updates {
            lines.push(format!("suspense\t{}\t{}", u.id, u.suspense_date));
        }
        for id in &r.released {
            lines.push(format!("released\t{}", id));
        }
        for id in &r.already_released {
            lines.push(format!("already_released\t{}", id));
        }
        lines.push(format!(
            "{} suspense dates set, {} eligible, {} released",
            r.suspense_updates.len(),
            r.eligible_transactions.len(),
            r.released.len()
        ));
        lines
    })
}

fn now() -> chrono::NaiveDateTime {
    use chrono::SubsecRound;
    chrono::Local::now().naive_local().trunc_subsecs(0)
}

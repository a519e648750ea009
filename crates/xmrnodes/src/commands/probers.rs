//! Prober command handlers.

use tabled::Tabled;
use xmrnodes_core::format::time_since;
use xmrnodes_core::{Monitor, Prober};

use crate::cli::{GlobalOpts, ProbersArgs, ProbersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProberRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "API Key")]
    api_key: String,
    #[tabled(rename = "Last Submit")]
    last_submit: String,
}

impl From<&Prober> for ProberRow {
    fn from(p: &Prober) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            api_key: p.api_key.to_string(),
            last_submit: if p.last_submit_ts == 0 {
                "never".into()
            } else {
                time_since(p.last_submit_ts)
            },
        }
    }
}

fn detail(p: &Prober) -> String {
    format!("ID       {}\nName     {}\nAPI key  {}", p.id, p.name, p.api_key)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: ProbersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProbersCommand::List { list, name } => {
            let table = monitor.table();
            util::apply_list_args(&table, &list);
            if let Some(ref name) = name {
                table.add_filter("name", name);
            }
            util::apply_page(&table, &list);

            let page = util::require_session(monitor.probers(&table).await?)?;
            let out = output::render_list(&global.output, &page.items, |p| ProberRow::from(p), |p| {
                p.id.to_string()
            });
            output::print_output(&out, global.quiet);
            output::print_page_footer(&table, "probers", global);
            Ok(())
        }

        ProbersCommand::Create { name } => {
            match util::require_session(monitor.create_prober(&name).await?)? {
                Some(prober) => {
                    let out = output::render_single(&global.output, &prober, detail, |p| {
                        p.api_key.to_string()
                    });
                    output::print_output(&out, global.quiet);
                }
                None => util::notice(&format!("✓ Prober '{name}' created"), global.quiet),
            }
            Ok(())
        }

        ProbersCommand::Edit { id, name } => {
            let message = util::require_session(monitor.edit_prober(id, &name).await?)?;
            util::notice(&format!("✓ {message}"), global.quiet);
            Ok(())
        }

        ProbersCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete prober {id}? Its API key stops working."),
                "probers delete",
                global.yes,
            )? {
                return Ok(());
            }
            let message = util::require_session(monitor.delete_prober(id).await?)?;
            util::notice(&format!("✓ {message}"), global.quiet);
            Ok(())
        }
    }
}

//! dashboard-runner: headless renderer for the user metrics dashboard.
//!
//! Usage:
//!   dashboard-runner --select 1
//!   dashboard-runner --dataset data/dataset.json --select 4 --json
//!   dashboard-runner --db fixtures.db --ipc-mode

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use usermetrics_core::{
    config::DashboardConfig,
    dataset::Dataset,
    selection::SelectionStore,
    store::FixtureStore,
    types::UserId,
    view::{ChartView, DashboardView, TableView, TABLE_HEADERS},
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Select { user_id: UserId },
    SelectInput { value: String },
    Clear,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_mode = args.iter().any(|a| a == "--json");
    let select = selection_arg(&args);
    let data_dir = string_arg(&args, "--data-dir");
    let dataset_path = string_arg(&args, "--dataset");
    let db = string_arg(&args, "--db");

    let config = match data_dir {
        Some(dir) => DashboardConfig::load(dir)?,
        None => DashboardConfig::default(),
    };

    let dataset = match (dataset_path, db) {
        (Some(path), _) => Dataset::load_json(path)?,
        (None, Some(db)) => FixtureStore::open_read_only(db)?.load_dataset()?,
        (None, None) => Dataset::sample(),
    };

    let mut selection = SelectionStore::new();
    if let Some(id) = select {
        selection.select(id);
    }

    if ipc_mode {
        let stdin = io::stdin();
        run_ipc_loop(stdin.lock(), io::stdout(), &config, &dataset, &mut selection)?;
    } else {
        let view = DashboardView::build(&config, &dataset, &selection);
        if json_mode {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            print_dashboard(&view);
        }
    }

    Ok(())
}

/// Serve line-delimited JSON commands from `input`, one JSON reply per
/// command on `output`. Blank lines are skipped; EOF or `quit` ends it.
fn run_ipc_loop<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    config: &DashboardConfig,
    dataset: &Dataset,
    selection: &mut SelectionStore,
) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unknown command: {}", buffer.trim());
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(output, "{}", err_json)?;
                output.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Select { user_id } => selection.select(user_id),
            IpcCommand::SelectInput { value } => selection.select_from_input(&value),
            IpcCommand::Clear => selection.clear(),
        }

        let view = DashboardView::build(config, dataset, selection);
        writeln!(output, "{}", serde_json::to_string(&view)?)?;
        output.flush()?;
    }
    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    println!("=== {} ===", view.title);
    println!();
    println!("Select User:");
    println!("  {}", view.selector_prompt);
    for opt in &view.options {
        let marker = if view.selected == Some(opt.value) { '*' } else { ' ' };
        println!("{marker} [{}] {}", opt.value, opt.label);
    }
    println!();

    match &view.table {
        TableView::Row(row) => {
            println!("  {}", TABLE_HEADERS.join(" | "));
            println!(
                "  {} | {} | {} | {}",
                row.user_name, row.balance, row.total_call_duration, row.total_email_count
            );
        }
        TableView::Placeholder(msg) => println!("  {msg}"),
    }
    println!();

    match &view.chart {
        ChartView::Line(chart) => {
            for series in &chart.datasets {
                println!("  {}", series.label);
                for (label, value) in chart.labels.iter().zip(&series.data) {
                    println!("    {label:<14} {value}");
                }
            }
        }
        ChartView::Placeholder(msg) => println!("  {msg}"),
    }
}

/// `--select ID`. A value that is not an id is reported and ignored.
fn selection_arg(args: &[String]) -> Option<UserId> {
    let raw = string_arg(args, "--select")?;
    match raw.parse::<UserId>() {
        Ok(id) => Some(id),
        Err(_) => {
            log::warn!("Ignoring --select {raw:?}: not a user id");
            None
        }
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn run_script(script: &str) -> Vec<Value> {
        let config = DashboardConfig::default();
        let dataset = Dataset::sample();
        let mut selection = SelectionStore::new();
        let mut out = Vec::new();
        run_ipc_loop(script.as_bytes(), &mut out, &config, &dataset, &mut selection)
            .expect("ipc loop");
        String::from_utf8(out)
            .expect("utf-8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("each reply is JSON"))
            .collect()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn select_then_clear_replies_row_then_placeholder() {
        let replies = run_script(
            "{\"type\":\"select\",\"user_id\":1}\n{\"type\":\"clear\"}\n",
        );
        assert_eq!(replies.len(), 2, "one reply per command: {replies:?}");

        assert_eq!(replies[0]["selected"], 1);
        assert_eq!(replies[0]["table"]["kind"], "row");
        assert_eq!(replies[0]["table"]["content"]["user_name"], "John Doe");
        assert_eq!(replies[0]["table"]["content"]["total_call_duration"], "120 minutes");

        assert!(replies[1]["selected"].is_null());
        assert_eq!(replies[1]["table"]["kind"], "placeholder");
        assert_eq!(replies[1]["chart"]["kind"], "placeholder");
    }

    #[test]
    fn garbage_line_replies_with_error_and_continues() {
        let replies = run_script("not json at all\n{\"type\":\"get_state\"}\n");
        assert_eq!(replies.len(), 2);
        assert!(replies[0]["error"].is_string(), "expected error object: {}", replies[0]);
        assert_eq!(replies[1]["table"]["kind"], "placeholder");
    }

    #[test]
    fn quit_stops_without_reply() {
        let replies = run_script(
            "{\"type\":\"quit\"}\n{\"type\":\"select\",\"user_id\":2}\n",
        );
        assert!(replies.is_empty(), "nothing after quit: {replies:?}");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let replies = run_script("\n   \n{\"type\":\"get_state\"}\n");
        assert_eq!(replies.len(), 1);
    }

    #[test]
    fn select_input_uses_picker_rules() {
        let replies = run_script(
            "{\"type\":\"select_input\",\"value\":\"4\"}\n{\"type\":\"select_input\",\"value\":\"\"}\n",
        );
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["selected"], 4);
        assert_eq!(
            replies[0]["chart"]["content"]["datasets"][0]["label"],
            "Alice Brown's Data"
        );
        assert!(replies[1]["selected"].is_null());
    }

    #[test]
    fn select_flag_parsing() {
        assert_eq!(selection_arg(&args(&["runner", "--select", "3"])), Some(3));
        assert_eq!(selection_arg(&args(&["runner", "--select", "abc"])), None);
        assert_eq!(selection_arg(&args(&["runner"])), None);
    }
}

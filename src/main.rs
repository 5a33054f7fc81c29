// Entry point and high-level CLI flow.
//
// - Option [1] loads the order sheet (.xlsx/.xls/.csv), filters it to
//   shipper/admin rows and prints diagnostics.
// - Option [2] aggregates the sign-off report, previews it and exports
//   CSV + JSON summary.
// - Option [3] filters the finished report by name, role or evaluation.
mod collate;
mod extract;
mod filter;
mod output;
mod report;
mod types;
mod util;

use filter::ReportFilter;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use types::{DeliveryRecord, Evaluation, ReportRow};

// Simple in-memory app state so we only load the sheet once but can
// generate and filter the report multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        records: None,
        report: None,
    })
});

struct AppState {
    records: Option<Vec<DeliveryRecord>>,
    report: Option<Vec<ReportRow>>,
}

/// Print a label and read one trimmed line of input.
fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the menu after generating the report.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match prompt("Back to menu (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load and role-filter the order sheet.
///
/// On success the records are cached in `APP_STATE` and any previously
/// generated report is discarded.
fn handle_load() {
    let path = prompt("Order sheet path (.xlsx/.xls/.csv): ");
    if path.is_empty() {
        println!("No file given.\n");
        return;
    }
    match extract::load_records(Path::new(&path)) {
        Ok((records, load_report)) => {
            println!(
                "Processing {}... ({} rows scanned, {} shipper/admin rows kept)\n",
                path,
                util::format_int(load_report.total_rows as i64),
                util::format_int(load_report.kept_rows as i64)
            );
            let mut state = APP_STATE.lock().unwrap();
            state.records = Some(records);
            state.report = None;
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: aggregate, preview and export the report.
fn handle_generate_report() {
    let records = {
        let state = APP_STATE.lock().unwrap();
        state.records.clone()
    };
    let Some(records) = records else {
        println!("Error: No data loaded. Please load the order sheet first (option 1).\n");
        return;
    };

    let rows = match report::build_report(&records) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Report error: {}\n", e);
            return;
        }
    };

    println!("Sign-off report ({} employees):\n", rows.len() - 1);
    output::print_table(&rows);

    let report_file = "bao_cao_ky_nhan.csv";
    if let Err(e) = output::write_csv(report_file, &rows) {
        eprintln!("Write error: {}", e);
    }
    let summary = report::generate_summary(&rows);
    if let Err(e) = output::write_json("summary.json", &summary) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "Overall ratio {} ({} pass / {} fail).",
        util::format_percent(summary.overall_ratio),
        summary.pass_count,
        summary.fail_count
    );
    println!("(Report exported to {}, stats to summary.json)\n", report_file);

    let mut state = APP_STATE.lock().unwrap();
    state.report = Some(rows);
}

/// Handle option [3]: filter the cached report and preview the view.
fn handle_filter() {
    let rows = {
        let state = APP_STATE.lock().unwrap();
        state.report.clone()
    };
    let Some(rows) = rows else {
        println!("Error: No report yet. Please generate it first (option 2).\n");
        return;
    };

    let name_search = prompt("Name contains (blank for all): ");
    let role = prompt("Role (blank for all): ");
    let evaluation = loop {
        let input = prompt("Evaluation (Đạt / Không đạt, blank for all): ");
        match input.as_str() {
            "" => break None,
            s if s == Evaluation::Dat.as_str() => break Some(Evaluation::Dat),
            s if s == Evaluation::KhongDat.as_str() => break Some(Evaluation::KhongDat),
            _ => println!("Invalid choice. Please enter Đạt, Không đạt or leave blank."),
        }
    };

    let filter = ReportFilter {
        role: (!role.is_empty()).then_some(role),
        evaluation,
        name_search: (!name_search.is_empty()).then_some(name_search),
    };

    let view = filter.apply(&rows);
    println!(
        "\n{} of {} rows match:\n",
        view.len(),
        rows.len()
    );
    output::print_table(&view);
}

fn main() {
    loop {
        println!("Delivery Sign-off Report");
        println!("[1] Load the order sheet");
        println!("[2] Generate the report");
        println!("[3] Filter the report\n");
        match prompt("Enter choice: ").as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!("");
                handle_generate_report();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => {
                handle_filter();
            }
            _ => {
                println!("Invalid choice. Please enter 1, 2 or 3.\n");
            }
        }
    }
}

//! ratedeck CLI
//!
//! Inspect department views of rate products from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a department's view of a product
//! ratedeck view --input rates.json --product international_outbound_rates --department Sales
//!
//! # Output the full bundle as JSON
//! ratedeck view --input rates.json --product international_outbound_rates \
//!     --department Sales --format json
//!
//! # Shape an export sheet
//! ratedeck export --input rates.json --product international_outbound_rates \
//!     --department Sales --output sheet.json
//!
//! # Generate a random rates file for testing
//! ratedeck generate --rows 50 --output rates.json
//! ```

use ratedeck::config::PortalConfig;
use ratedeck::core::currency::{CurrencyCode, FxRateQuote};
use ratedeck::core::department::Department;
use ratedeck::core::product::ProductType;
use ratedeck::export::bundle::assemble_view;
use ratedeck::export::sheet::build_export;
use ratedeck::sample::{generate_outbound_rows, SampleConfig};
use ratedeck::store::MemoryStore;
use rust_decimal_macros::dec;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"ratedeck — telecom rate deck pricing and department visibility

USAGE:
    ratedeck <COMMAND> [OPTIONS]

COMMANDS:
    view        Resolve a department's view of a product
    export      Shape an export sheet for a product and department
    generate    Generate a random rates file (for testing)
    help        Show this message

OPTIONS (view, export):
    --input <FILE>        Path to JSON rates file
    --product <NAME>      Product type (e.g. international_outbound_rates)
    --department <NAME>   Requesting department
    --format <FORMAT>     view only: text (default) or json
    --output <FILE>       export only: write sheet JSON to file

OPTIONS (generate):
    --rows <N>            Number of rows (default: 100)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    ratedeck view --input rates.json --product international_outbound_rates --department Sales
    ratedeck export --input rates.json --product international_outbound_rates --department HR --output sheet.json
    ratedeck generate --rows 200 --output rates.json"#
    );
}

fn load_store(path: &str) -> MemoryStore {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "tables": {{
    "international_outbound_rates": [
      {{ "id": 1, "country": "Peru", "cost_usd": "0.035" }}
    ]
  }},
  "fx_rates": [ {{ "currency": "EUR", "rate_to_usd": "1.08" }} ]
}}"#
        );
        process::exit(1);
    })
}

struct ViewArgs {
    input: String,
    product: ProductType,
    department: Department,
    format: String,
    output: Option<String>,
}

fn parse_view_args(args: &[String]) -> ViewArgs {
    let mut input = None;
    let mut product = None;
    let mut department = None;
    let mut format = "text".to_string();
    let mut output = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = Some(require_value(args, i, "--input"));
            }
            "--product" => {
                i += 1;
                product = Some(ProductType::new(require_value(args, i, "--product")));
            }
            "--department" => {
                i += 1;
                department = Some(Department::new(require_value(args, i, "--department")));
            }
            "--format" => {
                i += 1;
                format = require_value(args, i, "--format");
            }
            "--output" => {
                i += 1;
                output = Some(require_value(args, i, "--output"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    ViewArgs {
        input: input.unwrap_or_else(|| {
            eprintln!("Error: --input <FILE> is required");
            process::exit(1);
        }),
        product: product.unwrap_or_else(|| {
            eprintln!("Error: --product <NAME> is required");
            process::exit(1);
        }),
        department: department.unwrap_or_else(|| {
            eprintln!("Error: --department <NAME> is required");
            process::exit(1);
        }),
        format,
        output,
    }
}

fn require_value(args: &[String], i: usize, flag: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires a value", flag);
        process::exit(1);
    })
}

fn cmd_view(args: &[String]) {
    let opts = parse_view_args(args);
    let store = load_store(&opts.input);
    let config = PortalConfig::standard();

    let bundle = assemble_view(&config, &store, &opts.product, &opts.department)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

    if opts.format == "json" {
        println!("{}", serde_json::to_string_pretty(&bundle).unwrap());
        return;
    }

    println!("Product:      {}", bundle.product);
    println!("Department:   {}", bundle.department);
    println!("Rows:         {}", bundle.rows.len());
    println!("Valid until:  {}", bundle.valid_until.format("%Y-%m-%d"));
    println!();

    if bundle.table_columns.is_empty() {
        println!("No columns visible to this department.");
    } else {
        let headers: Vec<&str> = bundle
            .table_columns
            .iter()
            .map(|h| h.display.as_str())
            .collect();
        println!("{}", headers.join(" | "));
        for row in &bundle.rows {
            let cells: Vec<String> = bundle
                .table_columns
                .iter()
                .map(|h| match row.get(&h.name) {
                    Some(value) => serde_json::to_value(value)
                        .ok()
                        .and_then(|v| v.as_str().map(|s| s.to_string()))
                        .unwrap_or_default(),
                    None => String::new(),
                })
                .collect();
            println!("{}", cells.join(" | "));
        }
    }

    if bundle.has_dynamic_rates {
        println!();
        println!("Allowed floor families:");
        for floor in &bundle.allowed_floors {
            println!("  - {}", floor);
        }
    }
}

fn cmd_export(args: &[String]) {
    let opts = parse_view_args(args);
    let store = load_store(&opts.input);
    let config = PortalConfig::standard();

    let sheet = build_export(&config, &store, &opts.product, &opts.department)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

    let json = serde_json::to_string_pretty(&sheet).unwrap();
    match opts.output {
        Some(path) => {
            fs::write(&path, &json).unwrap_or_else(|e| {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            });
            eprintln!(
                "Wrote {} rows x {} columns → {}",
                sheet.rows.len(),
                sheet.columns.len(),
                path
            );
        }
        None => println!("{}", json),
    }
}

fn cmd_generate(args: &[String]) {
    let mut rows = 100usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                i += 1;
                rows = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--rows requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(require_value(args, i, "--output"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = SampleConfig {
        row_count: rows,
        ..Default::default()
    };
    let store = MemoryStore::new()
        .with_table(
            ProductType::new("international_outbound_rates"),
            generate_outbound_rows(&config),
        )
        .with_fx_rates(vec![
            FxRateQuote {
                currency: CurrencyCode::new("AUD"),
                rate_to_usd: dec!(0.65),
            },
            FxRateQuote {
                currency: CurrencyCode::new("EUR"),
                rate_to_usd: dec!(1.08),
            },
            FxRateQuote {
                currency: CurrencyCode::new("GBP"),
                rate_to_usd: dec!(1.27),
            },
        ]);

    let json = serde_json::to_string_pretty(&store).unwrap();
    match output_path {
        Some(path) => {
            fs::write(&path, &json).unwrap_or_else(|e| {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            });
            eprintln!("Generated {} rows → {}", rows, path);
        }
        None => println!("{}", json),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "view" => cmd_view(rest),
        "export" => cmd_export(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

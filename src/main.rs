//! # Kvitto CLI
//!
//! Usage:
//!   kvitto receipt.json
//!   echo '{ ... }' | kvitto
//!   kvitto --example > receipt.json
//!
//! The PDF lands in the output directory (`-o`, default `receipts/`),
//! named `<number>-<recipient>.pdf`. Fonts are read from
//! `fonts/Inter.ttf` and `fonts/Inter-Bold.ttf` unless overridden with
//! `--font` and `--font-bold`.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;

use kvitto::pdf::{self, FontData};
use kvitto::LayoutConfig;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_receipt_json());
        return;
    }

    let input = match read_input(&args) {
        Ok(input) => input,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    let out_dir = flag_value(&args, "-o").unwrap_or_else(|| "receipts".to_string());
    let font_path = flag_value(&args, "--font").unwrap_or_else(|| "fonts/Inter.ttf".to_string());
    let bold_path =
        flag_value(&args, "--font-bold").unwrap_or_else(|| "fonts/Inter-Bold.ttf".to_string());

    let fonts = match load_fonts(&font_path, &bold_path) {
        Ok(fonts) => fonts,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    let receipt = match kvitto::receipt_from_json(&input) {
        Ok(receipt) => receipt,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    match pdf::render_to_file(&receipt, Path::new(&out_dir), &fonts, &LayoutConfig::default()) {
        Ok(path) => eprintln!("✓ Written {}", path.display()),
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    }
}

fn read_input(args: &[String]) -> Result<String, String> {
    if args.len() > 1 && !args[1].starts_with('-') {
        return fs::read_to_string(&args[1])
            .map_err(|e| format!("failed to read {}: {e}", args[1]));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(buf)
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn load_fonts(regular: &str, bold: &str) -> Result<FontData, String> {
    let regular_data =
        fs::read(regular).map_err(|e| format!("failed to read font '{regular}': {e}"))?;
    let bold_data = fs::read(bold).map_err(|e| format!("failed to read font '{bold}': {e}"))?;
    Ok(FontData {
        regular: regular_data,
        bold: bold_data,
    })
}

fn example_receipt_json() -> &'static str {
    r##"{
  "number": "083",
  "date": "Aug 3, 2023",
  "billFrom": {
    "name": "Gopher Inc.",
    "logo": "gopher.png",
    "email": "gopher@gmail.com"
  },
  "billTo": {
    "name": "John Doe",
    "email": "john@gmail.com"
  },
  "items": [
    { "name": "Mystic Staff", "quantity": 8, "price": 320 },
    { "name": "Aghanim's Scepter", "quantity": 4, "price": 420 },
    { "name": "Perseverance", "quantity": 1, "price": 100 },
    { "name": "Vitality Booster", "quantity": 19, "price": 110 },
    { "name": "Sacred Relic", "quantity": 2, "price": 380 }
  ],
  "notes": "Thank you for your business",
  "tax": 130,
  "discount": 80
}
"##
}

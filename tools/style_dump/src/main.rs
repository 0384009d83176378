//! Loads a stylesheet and dumps the resolved configuration document.
//!
//! Useful for checking what a `.css` stylesheet actually resolved to, or
//! for converting between stylesheet formats.

use anyhow::{Context, Result};
use clap::{Arg, Command};

use map_symbology::foundation::logging;
use map_symbology::StyleSheet;

fn main() -> Result<()> {
    logging::init();

    let matches = Command::new("style_dump")
        .about("Loads a stylesheet (.css, .ron, .toml) and dumps the resolved configuration")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .required(true)
                .help("Stylesheet file to load"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the resolved document to a .ron or .toml file instead of stdout"),
        )
        .get_matches();

    let input = matches
        .get_one::<String>("input")
        .context("input path is required")?;

    let sheet = StyleSheet::load_from_file(input)
        .with_context(|| format!("failed to load stylesheet {input:?}"))?;

    if let Some(output) = matches.get_one::<String>("output") {
        sheet
            .save_to_file(output)
            .with_context(|| format!("failed to write {output:?}"))?;
        eprintln!("wrote {} style(s) to {output}", sheet.len());
    } else {
        let text = ron::ser::to_string_pretty(&sheet.get_config(), ron::ser::PrettyConfig::default())
            .context("failed to serialize configuration")?;
        println!("{text}");
    }

    Ok(())
}

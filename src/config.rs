use clap::Parser;

use crate::OutputFormat;

/// Command line of the `vulkaninfo` binary.
#[derive(Clone, Debug, Parser)]
#[command(name = "vulkaninfo")]
#[command(about = "Print the Vulkan capabilities of every available device", long_about = None)]
pub struct Args {
    /// Write an html report to vulkaninfo.html in the working directory
    #[arg(long)]
    pub html: bool,

    /// Print DevSim compatible json for one device, the first by default
    #[arg(
        short,
        long,
        value_name = "GPU",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "0"
    )]
    pub json: Option<usize>,

    /// Print every section as json, for all devices
    #[arg(long)]
    pub full_json: bool,

    /// Include format properties in the text output
    #[arg(long)]
    pub show_formats: bool,
}

/// Which documents a report produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// One document per entry, in this order.
    pub formats: Vec<OutputFormat>,
    /// Device the compact json describes.
    pub selected_gpu: usize,
    pub show_formats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Text],
            selected_gpu: 0,
            show_formats: false,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mut formats = Vec::new();

        if args.html {
            formats.push(OutputFormat::Html);
        }

        if args.json.is_some() {
            formats.push(OutputFormat::Json);
        }

        if args.full_json {
            formats.push(OutputFormat::FullJson);
        }

        if formats.is_empty() {
            formats.push(OutputFormat::Text);
        }

        Self {
            formats,
            selected_gpu: args.json.unwrap_or_default(),
            show_formats: args.show_formats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let args = Args::try_parse_from(std::iter::once("vulkaninfo").chain(args.iter().copied()));
        Config::from(args.unwrap())
    }

    #[test]
    fn text_is_the_default() {
        assert_eq!(config(&[]), Config::default());
        assert!(config(&["--show-formats"]).show_formats);
    }

    #[test]
    fn json_selects_a_device() {
        assert_eq!(config(&["--json"]).selected_gpu, 0);
        assert_eq!(config(&["-j"]).formats, [OutputFormat::Json]);
        assert_eq!(config(&["--json=2"]).selected_gpu, 2);
    }

    #[test]
    fn formats_combine_without_text() {
        assert_eq!(
            config(&["--full-json", "--html", "--json"]).formats,
            [OutputFormat::Html, OutputFormat::Json, OutputFormat::FullJson]
        );
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        assert!(Args::try_parse_from(["vulkaninfo", "--bogus"]).is_err());
        assert!(Args::try_parse_from(["vulkaninfo", "--json=first"]).is_err());
    }
}

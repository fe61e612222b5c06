use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::config::CartaConfig;
use crate::error::CliResult;

#[derive(Debug, Args)]
pub(crate) struct InitConfigArgs {
    /// Print the configuration instead of writing it
    #[arg(long)]
    print: bool,
}

/// Writes the effective configuration (file, environment and defaults
/// merged) to `path` or the platform config directory.
pub(crate) fn run(
    args: InitConfigArgs,
    config: &CartaConfig,
    path: Option<PathBuf>,
    out: &mut impl Write,
) -> CliResult<()> {
    if args.print {
        write!(out, "{}", toml::to_string_pretty(config)?)?;
        return Ok(());
    }

    config.save(path)?;
    writeln!(out, "configuration written")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carta.toml");

        let mut out = Vec::new();
        run(
            InitConfigArgs { print: false },
            &CartaConfig::default(),
            Some(path.clone()),
            &mut out,
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let written: CartaConfig = toml::from_str(&contents).unwrap();
        assert_eq!(written.amount.max, 9);
    }

    #[test]
    fn test_init_config_print() {
        let mut out = Vec::new();
        run(InitConfigArgs { print: true }, &CartaConfig::default(), None, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[amount]"));
        assert!(text.contains("unit_price_basis = \"base\""));
    }
}

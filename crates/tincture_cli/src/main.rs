//! Tincture CLI
//!
//! Share, inspect, render and scan dynamic themes from the command line.

mod files;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tincture_code::{CodeRenderer, CodeScanner};
use tincture_color::{Color, ColorMap, ColorRole, DynamicColors, Resolvable};
use tincture_theme::{ThemeCodec, ThemeConfig, ThemeKey, ThemeRecord};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tincture")]
#[command(about = "Share, render and scan dynamic themes")]
#[command(version)]
struct Cli {
    /// Theme configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the percent-encoded token of a theme file
    Encode {
        /// Theme file
        theme: PathBuf,
    },

    /// Print the share URL of a theme file
    Url {
        /// Theme file
        theme: PathBuf,
    },

    /// Print a token, share URL or theme file as JSON
    Decode {
        /// Token, share URL or theme file
        input: String,
    },

    /// Print a theme file as JSON
    Show {
        /// Theme file
        theme: PathBuf,
    },

    /// Check whether a candidate looks like a theme token
    Validate {
        /// Candidate token or URL
        candidate: String,
    },

    /// Print the dark and light colors derived from seed colors
    Mutate {
        /// Background seed (#RRGGBB or #AARRGGBB)
        #[arg(long)]
        background: Color,

        #[arg(long)]
        primary: Option<Color>,

        #[arg(long)]
        accent: Option<Color>,

        /// Mark the theme as dark
        #[arg(long)]
        dark: bool,

        /// Mark the theme as inverse
        #[arg(long)]
        inverse: bool,
    },

    /// Render the 2D code of a theme file
    Render {
        /// Theme file
        theme: PathBuf,

        /// Output PNG (defaults to a time-stamped name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image placed in the center of the code
        #[arg(long)]
        overlay: Option<PathBuf>,
    },

    /// Recover a theme token from a 2D code image
    Scan {
        /// Image file
        image: PathBuf,

        /// Also write the theme file here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the theme file under a time-stamped name
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Arc::new(files::load_config(cli.config.as_deref())?);
    debug!("Using config: {:?}", config);
    run(cli.command, config)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tincture=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tincture=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: Arc<ThemeConfig>) -> Result<()> {
    let codec = ThemeCodec::new(config.clone());

    match command {
        Commands::Encode { theme } => {
            let theme = files::load_theme(&theme, &codec)?;
            println!("{}", codec.encode(&theme));
        }
        Commands::Url { theme } => {
            let theme = files::load_theme(&theme, &codec)?;
            println!("{}", codec.url_for(&theme));
        }
        Commands::Decode { input } => {
            let theme = files::resolve_theme(&input, &codec)?;
            println!("{}", codec.to_json_string(&theme));
        }
        Commands::Show { theme } => {
            let theme = files::load_theme(&theme, &codec)?;
            println!("{}", codec.to_json_string(&theme));
        }
        Commands::Validate { candidate } => {
            let valid = codec.is_valid_token(&candidate);
            println!("{}", valid);
            if !valid {
                bail!("not a valid theme token");
            }
        }
        Commands::Mutate {
            background,
            primary,
            accent,
            dark,
            inverse,
        } => {
            let output = mutate(&config, background, primary, accent, dark, inverse);
            println!("{:#}", output);
        }
        Commands::Render {
            theme,
            output,
            overlay,
        } => {
            let theme = files::load_theme(&theme, &codec)?;
            let overlay = overlay.as_deref().map(files::load_image).transpose()?;
            let image = CodeRenderer::new(config)
                .try_render(&theme, &codec.to_short(&theme), overlay.as_ref())
                .context("Failed to render theme code")?;
            let path = files::save_image(&image, output)?;
            info!("Wrote {}x{} code to {}", image.width(), image.height(), path.display());
            println!("{}", path.display());
        }
        Commands::Scan {
            image,
            output,
            save,
        } => {
            let image = files::load_image(&image)?;
            let Some(token) = CodeScanner::new(config).scan(&image) else {
                bail!("no theme code found");
            };
            println!("{}", token);

            if output.is_some() || save {
                let theme = codec
                    .try_decode(&token)
                    .context("Scanned code is not a valid theme")?;
                let path = files::save_theme(&theme, output, &codec)?;
                info!("Saved theme to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Dark and light maps for the given seeds, plus which one the theme picks
fn mutate(
    config: &Arc<ThemeConfig>,
    background: Color,
    primary: Option<Color>,
    accent: Option<Color>,
    dark: bool,
    inverse: bool,
) -> Value {
    let mut theme = ThemeRecord::with_config(config.clone());
    theme
        .set_background_color(background, true)
        .set_dark_theme(Some(dark))
        .set_inverse_theme(inverse);

    let mut colors = DynamicColors::with_factor(config.mutation_factor);
    colors.put(ColorRole::Background, background);
    if let Some(primary) = primary {
        theme.set_primary_color(primary, true);
        colors.put(ColorRole::Primary, primary);
    }
    if let Some(accent) = accent {
        theme.set_accent_color(accent, true);
        colors.put(ColorRole::Accent, accent);
    }
    colors.mutate(&theme);

    let selected = if std::ptr::eq(colors.mutated(&theme), colors.dark()) {
        "dark"
    } else {
        "light"
    };

    let mut output = Map::new();
    output.insert("dark".to_string(), Value::Object(color_map(colors.dark())));
    output.insert("light".to_string(), Value::Object(color_map(colors.light())));
    output.insert("selected".to_string(), Value::String(selected.to_string()));
    Value::Object(output)
}

fn color_map(colors: &ColorMap) -> Map<String, Value> {
    ColorRole::ALL
        .into_iter()
        .filter_map(|role| {
            let value = match colors.get(&role)? {
                Resolvable::Value(color) => color.to_hex_string(),
                Resolvable::Auto => "auto".to_string(),
            };
            Some((ThemeKey::Color(role).name().to_string(), Value::String(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["tincture", "-v", "decode", "0vXFF112233"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Decode { ref input } if input == "0vXFF112233"));

        let cli = Cli::try_parse_from([
            "tincture",
            "mutate",
            "--background",
            "#FFFFFF",
            "--dark",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Mutate { background, dark: true, .. } if background == Color::WHITE
        ));

        assert!(Cli::try_parse_from(["tincture", "mutate", "--background", "white"]).is_err());
    }

    #[test]
    fn test_mutate_falls_back_to_background() {
        let config = Arc::new(ThemeConfig::default());
        let output = mutate(&config, Color::WHITE, None, None, false, false);

        assert_eq!(output["selected"], "light");
        assert_eq!(output["dark"]["accentColor"], "#FFFFFFFF");
        assert_eq!(output["light"]["accentColor"], "#FFFFFFFF");
        assert_eq!(output["dark"]["surfaceColor"], "auto");
        assert_ne!(output["dark"]["backgroundColor"], "#FFFFFFFF");
    }

    #[test]
    fn test_mutate_selects_dark_for_dark_themes() {
        let config = Arc::new(ThemeConfig::default());
        let output = mutate(&config, Color(0xFF202020), None, None, true, false);
        assert_eq!(output["selected"], "dark");

        let output = mutate(&config, Color(0xFF202020), None, None, true, true);
        assert_eq!(output["selected"], "light");
    }
}

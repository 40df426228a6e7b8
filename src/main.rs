//! Contrib Shooter command line
//!
//! Renders the static SVG or runs the simulation headless. The browser build
//! uses the bindings in `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::fs;
    use std::path::{Path, PathBuf};

    use clap::{Args, Parser, Subcommand};

    use contrib_shooter::calendar::ContributionCalendar;
    use contrib_shooter::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SVG_HEIGHT, SVG_WIDTH};
    use contrib_shooter::error::check_dimensions;
    use contrib_shooter::platform::today_epoch_day;
    use contrib_shooter::settings::{CollisionPolicy, SceneConfig};
    use contrib_shooter::sim::{AutoFire, Engine, run_headless};
    use contrib_shooter::{SceneError, error_svg, render_svg_with};

    /// Render a contribution calendar as a space shooter.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct CliArgs {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Write the animated SVG badge
        Svg {
            #[command(flatten)]
            source: Source,
            #[arg(long, default_value_t = SVG_WIDTH)]
            width: f32,
            #[arg(long, default_value_t = SVG_HEIGHT)]
            height: f32,
            /// Output file (stdout when omitted)
            #[arg(short, long, value_name = "FILE")]
            out: Option<PathBuf>,
        },
        /// Run the interactive engine without a screen and print the final state
        Simulate {
            #[command(flatten)]
            source: Source,
            #[arg(long, default_value_t = DEFAULT_WIDTH)]
            width: f32,
            #[arg(long, default_value_t = DEFAULT_HEIGHT)]
            height: f32,
            /// Frames to advance
            #[arg(long, default_value_t = 1800, value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
            frames: u32,
            /// Ambient fire seed
            #[arg(long, default_value_t = 0)]
            seed: u64,
            /// Override the collision policy (single-hit or piercing)
            #[arg(long, value_parser = parse_policy)]
            policy: Option<CollisionPolicy>,
        },
    }

    /// Where the calendar comes from; a mock is generated when no file is given
    #[derive(Debug, Args)]
    struct Source {
        /// Username shown in the HUD
        #[arg(short, long)]
        user: String,
        /// Calendar JSON in this crate's format
        #[arg(long, value_name = "FILE", conflicts_with = "graphql")]
        calendar: Option<PathBuf>,
        /// Raw GitHub GraphQL contribution response
        #[arg(long, value_name = "FILE")]
        graphql: Option<PathBuf>,
        /// Scene config JSON (partial configs are filled with defaults)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    }

    fn parse_policy(value: &str) -> Result<CollisionPolicy, String> {
        CollisionPolicy::parse(value).ok_or_else(|| format!("unknown policy '{}'", value))
    }

    fn read(path: &Path) -> Result<String, SceneError> {
        Ok(fs::read_to_string(path)?)
    }

    impl Source {
        fn load_calendar(&self) -> Result<ContributionCalendar, SceneError> {
            if let Some(path) = &self.calendar {
                log::info!("Reading calendar from {}", path.display());
                let mut calendar = ContributionCalendar::from_json(&read(path)?)?;
                if calendar.username.is_empty() {
                    calendar.username = self.user.clone();
                }
                Ok(calendar)
            } else if let Some(path) = &self.graphql {
                log::info!("Decoding GraphQL response from {}", path.display());
                ContributionCalendar::from_graphql(&self.user, &read(path)?)
            } else {
                log::warn!("No calendar given, using mock data for {}", self.user);
                Ok(ContributionCalendar::mock(&self.user, today_epoch_day()))
            }
        }

        fn load_config(&self) -> Result<SceneConfig, SceneError> {
            match &self.config {
                Some(path) => SceneConfig::from_json(&read(path)?),
                None => Ok(SceneConfig::default()),
            }
        }
    }

    fn write_output(out: Option<&Path>, text: &str) -> Result<(), SceneError> {
        match out {
            Some(path) => {
                fs::write(path, text)?;
                log::info!("Wrote {} bytes to {}", text.len(), path.display());
            }
            None => print!("{}", text),
        }
        Ok(())
    }

    pub fn run(args: CliArgs) -> Result<(), SceneError> {
        match args.command {
            Command::Svg {
                source,
                width,
                height,
                out,
            } => {
                check_dimensions(width, height)?;
                let config = source.load_config()?;
                // A failed fetch still yields an image
                let svg = match source.load_calendar() {
                    Ok(calendar) => render_svg_with(&calendar, &source.user, width, height, &config),
                    Err(e) => {
                        log::error!("Calendar unavailable: {}", e);
                        error_svg(&e.to_string())
                    }
                };
                write_output(out.as_deref(), &svg)
            }
            Command::Simulate {
                source,
                width,
                height,
                frames,
                seed,
                policy,
            } => {
                check_dimensions(width, height)?;
                let mut config = source.load_config()?;
                if let Some(policy) = policy {
                    config.collision_policy = policy;
                }
                let calendar = source.load_calendar()?;
                let mut engine = Engine::with_config(calendar, width, height, config);
                let mut autofire = AutoFire::new(seed);
                run_headless(&mut engine, &mut autofire, frames);

                let snapshot = engine.snapshot();
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                log::info!("SCORE: {}", snapshot.score_label());
                Ok(())
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::init();
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

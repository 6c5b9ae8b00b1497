use crate::settings::Settings;
use crate::sim::{INITIAL_DELAY, MIN_DELAY};
use crate::source::GridSource;
use crate::terminal::Glyphs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 40;

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Default, Clone)]
pub struct CliArgs {
    pub file: Option<PathBuf>,
    pub random: bool,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub seed: Option<u64>,
    pub dir: Option<PathBuf>,
    pub delay_ms: Option<u64>,
    pub alive: Option<char>,
    pub dead: Option<char>,
}

/// Fully resolved run configuration
#[derive(Debug, Clone)]
pub struct LifeConfig {
    /// `None` asks the operator through the startup prompt
    pub source: Option<GridSource>,
    pub dir: PathBuf,
    pub initial_delay: Duration,
    pub glyphs: Glyphs,
}

impl LifeConfig {
    /// Command line beats the settings file, which beats built-in defaults
    pub fn resolve(args: CliArgs, settings: &Settings) -> Self {
        let source = if let Some(path) = args.file {
            Some(GridSource::File(path))
        } else if args.random {
            Some(GridSource::Random {
                rows: args.rows.or(settings.grid.rows).unwrap_or(DEFAULT_ROWS),
                cols: args.cols.or(settings.grid.cols).unwrap_or(DEFAULT_COLS),
                seed: args.seed,
            })
        } else {
            None
        };

        let dir = args
            .dir
            .or_else(|| settings.grid.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let initial_delay = args
            .delay_ms
            .or(settings.display.delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(INITIAL_DELAY)
            .max(MIN_DELAY);

        let defaults = Glyphs::default();
        let glyphs = Glyphs {
            alive: args.alive.or(settings.display.alive).unwrap_or(defaults.alive),
            dead: args.dead.or(settings.display.dead).unwrap_or(defaults.dead),
        };

        Self {
            source,
            dir,
            initial_delay,
            glyphs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_args_or_settings() {
        let cfg = LifeConfig::resolve(CliArgs::default(), &Settings::default());
        assert!(cfg.source.is_none());
        assert_eq!(cfg.dir, PathBuf::from("."));
        assert_eq!(cfg.initial_delay, Duration::from_millis(500));
        assert_eq!(cfg.glyphs, Glyphs::default());
    }

    #[test]
    fn file_wins_over_random() {
        let args = CliArgs {
            file: Some(PathBuf::from("glider.txt")),
            random: true,
            ..Default::default()
        };
        let cfg = LifeConfig::resolve(args, &Settings::default());
        assert_eq!(cfg.source, Some(GridSource::File(PathBuf::from("glider.txt"))));
    }

    #[test]
    fn random_dimensions_fall_back_through_settings() {
        let settings = Settings::parse("[grid]\nrows = 7\ncols = 9\n").unwrap();
        let args = CliArgs {
            random: true,
            cols: Some(11),
            seed: Some(5),
            ..Default::default()
        };
        let cfg = LifeConfig::resolve(args, &settings);
        assert_eq!(cfg.source, Some(GridSource::Random { rows: 7, cols: 11, seed: Some(5) }));
    }

    #[test]
    fn delay_is_clamped_to_floor() {
        let args = CliArgs {
            delay_ms: Some(20),
            ..Default::default()
        };
        let cfg = LifeConfig::resolve(args, &Settings::default());
        assert_eq!(cfg.initial_delay, MIN_DELAY);
    }

    #[test]
    fn settings_delay_and_glyphs_apply() {
        let settings = Settings::parse("[display]\ndelay_ms = 800\nalive = \"@\"\n").unwrap();
        let args = CliArgs {
            dead: Some('-'),
            ..Default::default()
        };
        let cfg = LifeConfig::resolve(args, &settings);
        assert_eq!(cfg.initial_delay, Duration::from_millis(800));
        assert_eq!(cfg.glyphs, Glyphs { alive: '@', dead: '-' });
    }
}

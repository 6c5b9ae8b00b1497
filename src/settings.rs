use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct GridSettings {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub dir: Option<PathBuf>,      // Where file mode looks for .txt grids
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplaySettings {
    pub delay_ms: Option<u64>,
    pub alive: Option<char>,
    pub dead: Option<char>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termlife")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_file() {
        let s = Settings::parse(
            r#"
            [grid]
            rows = 10
            cols = 30
            dir = "patterns"

            [display]
            delay_ms = 250
            alive = "o"
            dead = " "
            "#,
        )
        .unwrap();
        assert_eq!(s.grid.rows, Some(10));
        assert_eq!(s.grid.cols, Some(30));
        assert_eq!(s.grid.dir, Some(PathBuf::from("patterns")));
        assert_eq!(s.display.delay_ms, Some(250));
        assert_eq!(s.display.alive, Some('o'));
        assert_eq!(s.display.dead, Some(' '));
    }

    #[test]
    fn missing_sections_default() {
        let s = Settings::parse("[display]\ndelay_ms = 100\n").unwrap();
        assert_eq!(s.grid.rows, None);
        assert_eq!(s.display.delay_ms, Some(100));
    }

    #[test]
    fn bad_types_are_errors() {
        assert!(Settings::parse("[grid]\nrows = \"many\"\n").is_err());
    }
}

use anyhow::{Context, Result};
use directories::ProjectDirs;
use rollcall_core::{Course, NewStudent, Roster};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::cli::CliArgs;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    pub ui: UiConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct UiConfig {
    pub show_email_column: bool,
    /// How long the event loop waits for input before redrawing
    pub tick_rate_ms: u64,
}

/// Rosters loaded at startup. Nothing is written back on exit.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct SeedConfig {
    pub enabled: bool,
    /// Course codes every seeded student starts enrolled in
    #[serde(default)]
    pub auto_enroll: Vec<String>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub students: Vec<NewStudent>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            ui: UiConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_email_column: true,
            tick_rate_ms: 250,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        let courses = vec![
            Course::new("CS101", "Introduction to Programming"),
            Course::new("MATH201", "Calculus I"),
            Course::new("ENG101", "English Composition"),
        ];

        let majors = ["Computer Science", "Mathematics", "Physics", "Chemistry", "Biology"];
        let students = majors
            .iter()
            .enumerate()
            .map(|(i, major)| {
                let n = i + 1;
                NewStudent::new(
                    format!("S{:03}", n),
                    format!("Student {}", n),
                    format!("student{}@email.com", n),
                    *major,
                )
            })
            .collect();

        // Seeded students start in the first two courses
        let auto_enroll = courses
            .iter()
            .take(2)
            .map(|c| c.code().to_string())
            .collect();

        Self {
            enabled: true,
            auto_enroll,
            courses,
            students,
        }
    }
}

impl SeedConfig {
    /// Load the seed data into `roster` through the regular store operations
    pub fn populate(&self, roster: &mut Roster) -> rollcall_core::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        for course in &self.courses {
            roster.add_course(course.clone())?;
        }

        for new_student in &self.students {
            let id = roster.create_student(new_student.clone())?;
            for code in &self.auto_enroll {
                roster.enroll(id.as_str(), code.as_str())?;
            }
        }

        info!(
            "Seeded {} courses and {} students",
            roster.courses().len(),
            roster.students().len()
        );
        Ok(())
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "rollcall")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("rollcall.toml"))
}

pub fn get_default_log_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "rollcall")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.data_local_dir().join("rollcall.log"))
}

/// Appender that writes to exactly `path`, appending across runs
pub fn log_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&path, contents).with_context(|| {
            format!("Failed to write config file: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    pub fn from_cli(cli_args: &CliArgs) -> Result<Self> {
        let mut config = Self::load(cli_args.config.clone())?;

        // CLI args override config file
        if cli_args.no_seed {
            config.seed.enabled = false;
        }

        Ok(config)
    }

    /// Build the startup roster from the seed section
    pub fn build_roster(&self) -> Result<Roster> {
        let mut roster = Roster::new();
        self.seed
            .populate(&mut roster)
            .context("Invalid seed data in config")?;
        Ok(roster)
    }
}

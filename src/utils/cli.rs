//! Command-line argument parsing and help for reel.
//!
//! Flags override the matching config file values for this run only.
//!
//! When invoked with no args/flags (reel), reel simply launches the TUI in the
//! current directory.

use crate::config::Config;

pub enum CliAction {
    RunApp(Overrides),
    Exit,
}

/// Values given on the command line. `None` keeps the config value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub path: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub exe: Option<String>,
    pub args: Option<Vec<String>>,
    pub column_width: Option<u16>,
    pub filter_subs: Option<bool>,
    pub filter_samples: Option<bool>,
    pub rar_folders: Option<bool>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(width) = self.column_width {
            config.general_mut().set_column_width(width);
        }

        let media = config.media_mut();
        if let Some(extensions) = &self.extensions {
            media.extensions = extensions.clone();
        }
        if let Some(v) = self.filter_subs {
            media.filter_subs = v;
        }
        if let Some(v) = self.filter_samples {
            media.filter_samples = v;
        }
        if let Some(v) = self.rar_folders {
            media.rar_folders = v;
        }

        let player = config.player_mut();
        if let Some(exe) = &self.exe {
            player.exe = exe.clone();
        }
        if let Some(args) = &self.args {
            player.args = args.clone();
        }
    }
}

pub fn handle_args() -> CliAction {
    match parse_args(std::env::args().skip(1)) {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

/// Parses the arguments after the program name.
///
/// Value flags take `--flag value` or `--flag=value`. Boolean flags alone mean
/// `true`; `--flag=false` turns them off.
pub fn parse_args<I>(args: I) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    let mut overrides = Overrides::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        let mut value = |name: &str| -> Result<String, String> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args.next().ok_or_else(|| format!("{} needs a value", name)),
            }
        };

        match flag.as_str() {
            "--version" | "-v" => {
                print_version();
                return Ok(CliAction::Exit);
            }
            "-h" | "--help" => {
                print_help();
                return Ok(CliAction::Exit);
            }
            "--init" => {
                if let Err(e) = Config::generate_default(&Config::default_path()) {
                    eprintln!("Error: {}", e);
                }
                return Ok(CliAction::Exit);
            }
            "--extensions" => {
                overrides.extensions = Some(split_extensions(&value("--extensions")?));
            }
            "--exe" => overrides.exe = Some(value("--exe")?),
            "--args" => {
                let args = value("--args")?;
                overrides.args = Some(args.split_whitespace().map(str::to_string).collect());
            }
            "--cw" => {
                let raw = value("--cw")?;
                let width = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--cw expects a number, got '{}'", raw))?;
                overrides.column_width = Some(width);
            }
            "--filter-subs" => overrides.filter_subs = Some(parse_bool(&flag, inline.as_deref())?),
            "--filter-samples" => {
                overrides.filter_samples = Some(parse_bool(&flag, inline.as_deref())?)
            }
            "--rar-folders" => overrides.rar_folders = Some(parse_bool(&flag, inline.as_deref())?),
            other if !other.starts_with('-') && !other.trim().is_empty() => {
                if overrides.path.is_some() {
                    return Err("reel accepts only one PATH".to_string());
                }
                overrides.path = Some(other.to_string());
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(CliAction::RunApp(overrides))
}

fn parse_bool(flag: &str, value: Option<&str>) -> Result<bool, String> {
    match value {
        None => Ok(true),
        Some("true" | "1") => Ok(true),
        Some("false" | "0") => Ok(false),
        Some(other) => Err(format!("{} expects true or false, got '{}'", flag, other)),
    }
}

/// Splits a comma separated extension list. A missing leading dot is added.
fn split_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}

fn print_version() {
    println!("reel {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"reel - Browse directories and play media files from the terminal

USAGE:
  reel [OPTIONS] [PATH]

PATH:
  Directory to open (defaults to current directory)

OPTIONS:
      --extensions <LIST>     Comma separated media extensions [default: .avi,.mkv,.mpg,.wmv]
      --exe <NAME>            Player executable (must be in PATH). Empty uses vlc with remote control
      --args <ARGS>           Arguments passed to the player, space separated
      --cw <N>                Column width of the directory listing [default: 50]
      --filter-subs[=BOOL]    Hide rar files matching [.-]subs[.-] in recursive listings
      --filter-samples[=BOOL] Hide media matching [.-]sample[.-] in recursive listings
      --rar-folders[=BOOL]    Show and filter rar files by their folder in recursive listings
      --init                  Generate the default configuration
  -h, --help                  Print help information
  -v, --version               Display the current installed version of reel

KEYS:
  F3                          Change directory
  F4                          Recursive media search
  Ctrl+Space                  Pause the player
  Enter / Esc                 Open or play / clear filter or close

ENVIRONMENT:
  REEL_CONFIG                 Override the default config path
  REEL_LOG                    Log filter, e.g. debug [default: info]
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliAction, String> {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    fn overrides(args: &[&str]) -> Result<Overrides, Box<dyn std::error::Error>> {
        match parse(args)? {
            CliAction::RunApp(o) => Ok(o),
            CliAction::Exit => Err("unexpected exit".into()),
        }
    }

    #[test]
    fn no_args_runs_in_place() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(overrides(&[])?, Overrides::default());
        Ok(())
    }

    #[test]
    fn value_and_bool_flags() -> Result<(), Box<dyn std::error::Error>> {
        let o = overrides(&[
            "--extensions=mp4,.webm",
            "--cw",
            "2",
            "--filter-subs=false",
            "--rar-folders",
            "--args",
            "--fullscreen  --no-audio",
            "/srv/media",
        ])?;
        assert_eq!(
            o.extensions,
            Some(vec![".mp4".to_string(), ".webm".to_string()])
        );
        assert_eq!(o.column_width, Some(2));
        assert_eq!(o.filter_subs, Some(false));
        assert_eq!(o.filter_samples, None);
        assert_eq!(o.rar_folders, Some(true));
        assert_eq!(
            o.args,
            Some(vec!["--fullscreen".to_string(), "--no-audio".to_string()])
        );
        assert_eq!(o.path.as_deref(), Some("/srv/media"));
        Ok(())
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse(&["--cw", "wide"]).is_err());
        assert!(parse(&["--exe"]).is_err());
        assert!(parse(&["--filter-samples=maybe"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["a", "b"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() -> Result<(), Box<dyn std::error::Error>> {
        let mut config = Config::default();
        overrides(&["--exe", "mpv", "--cw", "60", "--filter-samples=0"])?.apply(&mut config);
        assert_eq!(config.player().exe(), "mpv");
        assert_eq!(config.general().column_width(), 60);
        overrides(&["--cw", "2"])?.apply(&mut config);
        assert_eq!(config.general().column_width(), 4);
        assert!(!config.media().filter_samples);
        assert!(config.media().filter_subs);
        Ok(())
    }
}

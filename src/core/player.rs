//! Media players.
//!
//! The default player is vlc driven through its `rc` remote control interface: a
//! file is queued by sending `add <path>` to the control socket, and when nobody
//! listens a new vlc is started with that interface enabled. Any other configured
//! program is simply launched with the file as its last argument.

use crate::config::Player;
use crate::error::{ReelError, Result};

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

/// Default remote controlled player.
pub const DEFAULT_PLAYER: &str = "vlc";

const CONTROL_TIMEOUT: Duration = Duration::from_millis(500);
const REPLY_BUFFER: usize = 1024;

pub trait MediaPlayer: Send + Sync {
    fn play(&self, path: &Path) -> Result<()>;
    fn pause(&self) -> Result<()>;
}

/// Builds the player described by the `[player]` settings.
pub fn from_settings(settings: &Player) -> Box<dyn MediaPlayer> {
    if settings.uses_remote_control() {
        Box::new(RemoteControlPlayer::new(DEFAULT_PLAYER, settings.control_addr()))
    } else {
        Box::new(CommandPlayer::new(settings.exe(), settings.args().to_vec()))
    }
}

#[derive(Debug, Clone)]
pub struct RemoteControlPlayer {
    exe: String,
    control_addr: String,
}

impl RemoteControlPlayer {
    pub fn new(exe: impl Into<String>, control_addr: impl Into<String>) -> Self {
        Self {
            exe: exe.into(),
            control_addr: control_addr.into(),
        }
    }

    /// Sends one command line to the control interface. The reply is read and
    /// dropped so the player doesn't block on a full socket.
    fn send(&self, command: &str) -> Result<()> {
        let control_err = |source| ReelError::Control {
            addr: self.control_addr.clone(),
            source,
        };

        let mut last_err = None;
        for addr in self.control_addr.to_socket_addrs().map_err(control_err)? {
            match TcpStream::connect_timeout(&addr, CONTROL_TIMEOUT) {
                Ok(mut stream) => {
                    stream
                        .set_read_timeout(Some(CONTROL_TIMEOUT))
                        .map_err(control_err)?;
                    stream.write_all(command.as_bytes()).map_err(control_err)?;
                    let mut reply = [0u8; REPLY_BUFFER];
                    let _ = stream.read(&mut reply);
                    tracing::debug!(command = command.trim_end(), addr = %addr, "player command sent");
                    return Ok(());
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(control_err(last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "address resolved to nothing")
        })))
    }

    /// Starts a new player with the control interface listening on our port.
    fn launch(&self, path: &Path) -> Result<()> {
        let exe = which::which(&self.exe).map_err(|_| ReelError::PlayerNotFound(self.exe.clone()))?;
        let port = self
            .control_addr
            .rsplit_once(':')
            .map(|(_, port)| port)
            .unwrap_or("47246");
        let rc_host = format!("127.0.0.1:{port}");

        let mut cmd = Command::new(&exe);
        cmd.args(["--extraintf", "rc", "--rc-host", &rc_host]).arg(path);
        spawn_detached(cmd, exe)?;
        tracing::info!(file = %path.display(), rc_host = %rc_host, "started remote controlled player");
        Ok(())
    }
}

impl MediaPlayer for RemoteControlPlayer {
    fn play(&self, path: &Path) -> Result<()> {
        match self.send(&format!("add {}\n", path.display())) {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::info!(error = %e, "no running player, launching one");
                self.launch(path)
            }
        }
    }

    fn pause(&self) -> Result<()> {
        self.send("pause\n")
    }
}

/// Launches `exe args... <file>` for every played file.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    exe: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(exe: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            exe: exe.into(),
            args,
        }
    }
}

impl MediaPlayer for CommandPlayer {
    fn play(&self, path: &Path) -> Result<()> {
        let exe = which::which(&self.exe).map_err(|_| ReelError::PlayerNotFound(self.exe.clone()))?;
        let mut cmd = Command::new(&exe);
        cmd.args(&self.args).arg(path);
        spawn_detached(cmd, exe)?;
        tracing::info!(file = %path.display(), exe = %self.exe, "launched player");
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        tracing::debug!(exe = %self.exe, "pause ignored, player has no control interface");
        Ok(())
    }
}

/// Spawns without attaching to the terminal and reaps the child in the background.
fn spawn_detached(mut cmd: Command, exe: PathBuf) -> Result<()> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ReelError::PlayerLaunch { exe, source })?;
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;

    fn serve_one(listener: TcpListener) -> std::thread::JoinHandle<String> {
        std::thread::spawn(move || {
            let Ok((stream, _)) = listener.accept() else {
                return String::new();
            };
            let mut line = String::new();
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            reader.read_line(&mut line).expect("read command");
            let mut stream = stream;
            let _ = stream.write_all(b"ok\n");
            line
        })
    }

    #[test]
    fn play_queues_file_over_control_socket() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let server = serve_one(listener);

        let player = RemoteControlPlayer::new("reel-test-no-such-player", addr.to_string());
        player.play(Path::new("/media/show.mkv"))?;

        let received = server.join().map_err(|_| "server panicked")?;
        assert_eq!(received, "add /media/show.mkv\n");
        Ok(())
    }

    #[test]
    fn pause_sends_pause() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let server = serve_one(listener);

        RemoteControlPlayer::new(DEFAULT_PLAYER, addr.to_string()).pause()?;
        assert_eq!(server.join().map_err(|_| "server panicked")?, "pause\n");
        Ok(())
    }

    #[test]
    fn missing_player_is_reported_after_failed_connect()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let addr = TcpListener::bind("127.0.0.1:0")?.local_addr()?;
        // listener dropped: nothing accepts on addr anymore
        let player = RemoteControlPlayer::new("reel-test-no-such-player", addr.to_string());
        let result = player.play(Path::new("/media/show.mkv"));
        assert!(matches!(result, Err(ReelError::PlayerNotFound(_))));

        assert!(matches!(player.pause(), Err(ReelError::Control { .. })));
        Ok(())
    }

    #[test]
    fn command_player_requires_executable() {
        let player = CommandPlayer::new("reel-test-no-such-player", vec!["--fs".into()]);
        assert!(matches!(
            player.play(Path::new("/media/show.mkv")),
            Err(ReelError::PlayerNotFound(_))
        ));
        assert!(player.pause().is_ok());
    }
}

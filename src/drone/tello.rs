use super::{Drone, Mailbox, Motion, State};
use crate::vision::Picture;
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{self, Write};
use std::net::UdpSocket;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

const RECEIVE_POLL: Duration = Duration::from_millis(200);
const DISTANCE_RANGE: std::ops::RangeInclusive<i64> = 20..=500;
const DEGREE_RANGE: std::ops::RangeInclusive<i64> = 1..=360;

#[derive(Debug, Clone)]
pub struct TelloConfig {
    pub address: String,
    pub command_port: u16,
    pub local_command_port: u16,
    pub state_port: u16,
    pub response_timeout: Duration,
    pub connect_attempts: usize,
    /// Where the command log is written at shutdown. `None` disables it.
    pub log_dir: Option<PathBuf>,
    /// Frame mailbox shared with a video decoder. A private one is made
    /// when `None`, and then only `TelloDrone::frames` can feed it.
    pub frames: Option<Arc<Mailbox<Picture>>>,
}

impl Default for TelloConfig {
    fn default() -> TelloConfig {
        TelloConfig {
            address: "192.168.10.1".into(),
            command_port: 8889,
            local_command_port: 8889,
            state_port: 8890,
            response_timeout: Duration::from_secs(5),
            connect_attempts: 5,
            log_dir: Some(PathBuf::from("logs")),
            frames: None,
        }
    }
}

struct Exchange {
    sent_at: DateTime<Local>,
    command: String,
    response: String,
}

/// ## Tello SDK driver
///
/// Commands go out on one UDP socket and wait for the reply the command
/// receiver drops into the response mailbox. Telemetry arrives on its own
/// socket. Frames are published by whatever decodes the video stream
/// through `frames()`.
pub struct TelloDrone {
    config: TelloConfig,
    socket: Option<UdpSocket>,
    response: Arc<Mailbox<String>>,
    state: Arc<Mailbox<State>>,
    frame: Arc<Mailbox<Picture>>,
    active: Arc<AtomicBool>,
    receivers: Vec<JoinHandle<()>>,
    connected: bool,
    flying: bool,
    log: Vec<Exchange>,
}

impl TelloDrone {
    pub fn new(config: TelloConfig) -> TelloDrone {
        let frame = match &config.frames {
            Some(frames) => frames.clone(),
            None => Arc::new(Mailbox::new()),
        };
        TelloDrone {
            config,
            socket: None,
            response: Arc::new(Mailbox::new()),
            state: Arc::new(Mailbox::new()),
            frame,
            active: Arc::new(AtomicBool::new(false)),
            receivers: vec![],
            connected: false,
            flying: false,
            log: vec![],
        }
    }

    /// Mailbox a video decoder publishes frames into.
    pub fn frames(&self) -> Arc<Mailbox<Picture>> {
        self.frame.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn open(&mut self) -> io::Result<()> {
        let socket = UdpSocket::bind(("0.0.0.0", self.config.local_command_port))?;
        socket.set_read_timeout(Some(RECEIVE_POLL))?;
        let command_rx = socket.try_clone()?;
        let state_rx = UdpSocket::bind(("0.0.0.0", self.config.state_port))?;
        state_rx.set_read_timeout(Some(RECEIVE_POLL))?;
        self.active.store(true, Ordering::SeqCst);

        let active = self.active.clone();
        let response = self.response.clone();
        self.receivers.push(thread::spawn(move || {
            receive_loop(command_rx, active, |bytes| {
                let reply = match std::str::from_utf8(bytes) {
                    Ok(s) => s.trim().to_string(),
                    Err(_) => "DECODE ERROR".to_string(),
                };
                response.put(reply);
            })
        }));

        let active = self.active.clone();
        let state = self.state.clone();
        self.receivers.push(thread::spawn(move || {
            receive_loop(state_rx, active, |bytes| {
                if let Ok(s) = std::str::from_utf8(bytes) {
                    state.put(parse_state(s));
                }
            })
        }));

        self.socket = Some(socket);
        Ok(())
    }

    /// Send and wait for the reply. `None` on timeout or send failure.
    fn send(&mut self, command: &str) -> Option<String> {
        let socket = self.socket.as_ref()?;
        self.response.clear();
        let sent_at = Local::now();
        let target = (self.config.address.as_str(), self.config.command_port);
        let reply = match socket.send_to(command.as_bytes(), target) {
            Ok(_) => self.response.wait_take(self.config.response_timeout),
            Err(e) => {
                warn!("tello send {:?} failed: {}", command, e);
                None
            }
        };
        debug!("tello {:?} -> {:?}", command, reply);
        self.log.push(Exchange {
            sent_at,
            command: command.to_string(),
            response: reply.clone().unwrap_or_else(|| "TIMED OUT".to_string()),
        });
        reply
    }

    fn command(&mut self, command: &str) -> bool {
        self.send(command).as_deref() == Some("ok")
    }

    fn motion(&mut self, motion: Motion, amount: i64) -> bool {
        let range = match motion {
            Motion::RotateCw | Motion::RotateCcw => DEGREE_RANGE,
            _ => DISTANCE_RANGE,
        };
        if !range.contains(&amount) {
            warn!("tello {} {} is out of range {:?}", motion, amount, range);
            return false;
        }
        self.command(&format!("{} {}", motion, amount))
    }

    fn write_log(&mut self) {
        let log = std::mem::take(&mut self.log);
        let dir = match &self.config.log_dir {
            Some(dir) if !log.is_empty() => dir.clone(),
            _ => return,
        };
        let name = Local::now().format("%Y-%m-%d_%H-%M-%S-cmd.log").to_string();
        let path = dir.join(name);
        let result = fs::create_dir_all(&dir).and_then(|_| {
            let mut file = File::create(&path)?;
            for (count, entry) in log.iter().enumerate() {
                writeln!(
                    file,
                    "Message[{}]: {} {}",
                    count,
                    entry.sent_at.format("%H:%M:%S%.3f"),
                    entry.command
                )?;
                writeln!(file, "Response[{}]: {}", count, entry.response)?;
            }
            Ok(())
        });
        match result {
            Ok(_) => info!("tello command log written to {}", path.display()),
            Err(e) => warn!("unable to write {}: {}", path.display(), e),
        }
    }
}

fn receive_loop<F: Fn(&[u8])>(socket: UdpSocket, active: Arc<AtomicBool>, deliver: F) {
    let mut buf = [0u8; 1024];
    while active.load(Ordering::SeqCst) {
        match socket.recv_from(&mut buf) {
            Ok((len, _)) => deliver(&buf[..len]),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut => {}
            Err(e) => {
                if active.load(Ordering::SeqCst) {
                    tracing::error!("tello receive failed: {}", e);
                }
            }
        }
    }
}

/// Parse a `key:value;key:value;` telemetry packet.
pub fn parse_state(packet: &str) -> State {
    packet
        .trim()
        .split(';')
        .filter_map(|item| {
            let mut parts = item.splitn(2, ':');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if !key.is_empty() => {
                    Some((key.to_string(), value.to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

impl Drone for TelloDrone {
    fn connect(&mut self) -> bool {
        if let Err(e) = self.open() {
            warn!("unable to open tello sockets: {}", e);
            return false;
        }
        for attempt in 1..=self.config.connect_attempts {
            if self.command("command") {
                self.connected = true;
                self.command("streamon");
                return true;
            }
            debug!("tello connect attempt {} failed", attempt);
        }
        warn!("problem connecting to drone");
        false
    }

    fn shutdown(&mut self) {
        if self.connected && self.flying {
            self.command("land");
            self.flying = false;
        }
        self.active.store(false, Ordering::SeqCst);
        for receiver in self.receivers.drain(..) {
            if receiver.join().is_err() {
                warn!("tello receiver panicked");
            }
        }
        self.socket = None;
        self.connected = false;
        self.write_log();
    }

    fn takeoff(&mut self) -> bool {
        let ok = self.command("takeoff");
        if ok {
            self.flying = true;
        }
        ok
    }

    fn land(&mut self) -> bool {
        let ok = self.command("land");
        if ok {
            self.flying = false;
        }
        ok
    }

    fn forward(&mut self, distance: i64) -> bool {
        self.motion(Motion::Forward, distance)
    }

    fn backward(&mut self, distance: i64) -> bool {
        self.motion(Motion::Backward, distance)
    }

    fn left(&mut self, distance: i64) -> bool {
        self.motion(Motion::Left, distance)
    }

    fn right(&mut self, distance: i64) -> bool {
        self.motion(Motion::Right, distance)
    }

    fn up(&mut self, distance: i64) -> bool {
        self.motion(Motion::Up, distance)
    }

    fn down(&mut self, distance: i64) -> bool {
        self.motion(Motion::Down, distance)
    }

    fn rotate_cw(&mut self, degrees: i64) -> bool {
        self.motion(Motion::RotateCw, degrees)
    }

    fn rotate_ccw(&mut self, degrees: i64) -> bool {
        self.motion(Motion::RotateCcw, degrees)
    }

    fn get_frame(&mut self) -> Option<Picture> {
        self.frame.latest()
    }

    fn get_state(&self) -> State {
        self.state.latest().unwrap_or_default()
    }
}

impl Drop for TelloDrone {
    fn drop(&mut self) {
        if !self.receivers.is_empty() || self.connected {
            self.shutdown();
        }
    }
}

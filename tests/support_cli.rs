use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, UdpSocket};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Poll period of the fake servers' shutdown check.
const POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Proxy settings honoured by the DOH client.
const PROXY_ENV_VARS: [&str; 8] = [
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
    "NO_PROXY",
    "no_proxy",
];
/// QR bit in the third header byte.
const RESPONSE_FLAG: u8 = 0x80;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a UDP resolver that answers every query with the query itself,
/// flagged as a response.
///
/// # Errors
///
/// Returns an error if the socket cannot be created or configured.
pub fn spawn_udp_echo_server() -> Result<(SocketAddr, ServerHandle), String> {
    let socket =
        UdpSocket::bind("127.0.0.1:0").map_err(|err| format!("bind udp server failed: {}", err))?;
    let addr = socket
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    socket
        .set_read_timeout(Some(POLL_INTERVAL))
        .map_err(|err| format!("set_read_timeout failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            let Ok((len, peer)) = socket.recv_from(&mut buf) else {
                continue;
            };
            let Some(reply) = buf.get_mut(..len) else {
                continue;
            };
            if let Some(flags) = reply.get_mut(2) {
                *flags |= RESPONSE_FLAG;
            }
            drop(socket.send_to(reply, peer));
        }
    });

    Ok((
        addr,
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Spawn a lightweight HTTP server that answers every request with a
/// non-empty body, standing in for a DOH endpoint.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(POLL_INTERVAL);
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/dns-query", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut buffer = [0u8; 4096];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    if stream
        .write_all(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/dns-message\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        )
        .is_err()
    {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `dnsstress` binary in `dir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_dnsstress<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_dnsstress_with_env(dir, args, &[])
}

/// Like [`run_dnsstress`] with extra environment variables. Proxy variables
/// inherited from the test environment are cleared first.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_dnsstress_with_env<I, S>(
    dir: &Path,
    args: I,
    envs: &[(&str, &str)],
) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = dnsstress_bin()?;
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(dir)
        .env("DNSSTRESS_LOG", "error")
        .env("NO_COLOR", "1");
    for name in PROXY_ENV_VARS {
        command.env_remove(name);
    }
    command
        .envs(envs.iter().copied())
        .output()
        .map_err(|err| format!("run dnsstress failed: {}", err))
}

fn dnsstress_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_dnsstress").map_or_else(
        || Err("CARGO_BIN_EXE_dnsstress missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

#[must_use]
pub fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

//! Configuration utilities (port, static dir, env vars)

use std::{env, net::{Ipv4Addr, SocketAddr}};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

/// Socket address to bind the server to.
///
/// Reads the `PORT` env var or defaults to 3000, binds to 0.0.0.0.
pub fn server_addr() -> SocketAddr {
    let port = parse_port(env::var("PORT").ok().as_deref());
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|v| v.trim().parse::<u16>().ok()).unwrap_or(DEFAULT_PORT)
}

/// Directory of static assets (the browser client).
/// `STATIC_DIR` env var, else `./public`.
pub fn static_dir() -> PathBuf {
    env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./public"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_on_garbage() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
        assert_eq!(parse_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(parse_port(Some("70000")), DEFAULT_PORT);
        assert_eq!(parse_port(Some("8080")), 8080);
    }
}

use std::fmt;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;

use crate::data::registry::DataRegistry;
use crate::data::workbook::WorkbookError;

pub mod api;
pub mod routes;

#[derive(Debug)]
pub enum ServerError {
    Io(std::io::Error),
    Load(WorkbookError),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "failed to load capacity table: {err}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Load the capacity table once, then serve requests over it. The table is
/// read-only for the lifetime of the process; restart to pick up a new
/// workbook.
pub fn run_server(bind_addr: &str) -> Result<(), ServerError> {
    let registry = DataRegistry::load().map_err(ServerError::Load)?;
    let listener = TcpListener::bind(bind_addr)?;
    println!(
        "cityplan server listening on http://{bind_addr} ({} records from {})",
        registry.table().len(),
        registry.source_path().display()
    );

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&registry, &mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(registry: &Arc<DataRegistry>, stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");

    let response = routes::route_request(registry, method, path, body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

use kubernetes_mcp_server_launcher::error::exit_code_for;
use kubernetes_mcp_server_launcher::launch::run;
use kubernetes_mcp_server_launcher::runtime::RealRuntime;
use std::ffi::OsString;

/// kubernetes-mcp-server launcher
///
/// Runs the pre-built kubernetes-mcp-server binary for this platform. Every
/// argument is passed through untouched and the server's exit code is
/// returned. Launcher failures exit with 125 (unsupported platform),
/// 126 (server could not be executed) or 127 (server not installed).
#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let code = match run(RealRuntime, args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    };

    std::process::exit(code);
}

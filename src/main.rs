// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Naiad CLI entrypoint.
//!
//! By default this runs the interactive TUI and serves the collaborator HTTP
//! API at `http://127.0.0.1:<port>/api/...` from the same diagram folder.
//!
//! Use `--serve` to run the HTTP API alone (headless deployments).

use std::error::Error;
use std::sync::Arc;

const DEFAULT_HTTP_PORT: u16 = 27441;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<data-dir>] [--durable-writes] [--http-port <port>]\n  {program} [--data <dir>] [--durable-writes] [--http-port <port>]\n  {program} [<data-dir>] [--durable-writes] [--http-port <port>] --serve\n\nTUI mode (default) also serves the HTTP API at `http://127.0.0.1:<port>/api`.\n--http-port selects the port (0 = ephemeral; default {DEFAULT_HTTP_PORT}).\n\nIf data-dir/--data is omitted, the current working directory is used.\n\n--serve runs the HTTP API without the TUI.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    serve: bool,
    data_dir: Option<String>,
    http_port: Option<u16>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--serve" => {
                if options.serve {
                    return Err(());
                }
                options.serve = true;
            }
            "--data" => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.data_dir = Some(dir);
            }
            "--http-port" => {
                if options.http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.http_port = Some(port);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                options.data_dir = Some(arg);
            }
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "naiad".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let dir = options.data_dir.unwrap_or_else(|| ".".to_owned());
        let folder = if options.durable_writes {
            naiad::store::DiagramFolder::new(dir)
                .with_durability(naiad::store::WriteDurability::Durable)
        } else {
            naiad::store::DiagramFolder::new(dir)
        };
        let folder = Arc::new(folder);
        let http_port = options.http_port.unwrap_or(DEFAULT_HTTP_PORT);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if options.serve {
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind(("127.0.0.1", http_port)).await?;
                let addr = listener.local_addr()?;
                eprintln!("naiad: serving HTTP API at http://{addr}/api");
                axum::serve(listener, naiad::api::router(folder)).await?;
                Ok::<(), Box<dyn Error>>(())
            })?;
            return Ok(());
        }

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", http_port)).await?;
            let router = naiad::api::router(folder.clone());

            let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                });
                if let Err(err) = serve.await {
                    eprintln!("naiad: HTTP server error: {err}");
                }
            });

            let tui_folder = folder.clone();
            let tui_join = tokio::task::spawn_blocking(move || {
                naiad::tui::run(Some(tui_folder)).map_err(|err| err.to_string())
            })
            .await;

            let _ = shutdown_tx.send(());
            let _ = server_handle.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::other(err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("naiad: {err}");
        std::process::exit(1);
    }
}

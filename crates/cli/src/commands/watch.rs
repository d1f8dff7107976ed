// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{block_on, Context};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sync::{ConnectivityMonitor, OnlineTrigger, TcpProbe};

/// Watch connectivity in the foreground and flush on every reconnect.
///
/// Runs until Ctrl-C. On Unix, `SIGUSR1` reports an established connection
/// and flushes right away.
pub fn run() -> Result<()> {
    let ctx = Context::load()?;
    let probe = probe_for(&ctx.config)?;
    let queue = Arc::new(ctx.open_queue());

    if !queue.is_available() {
        return Err(Error::StoreUnavailable(
            "the local store could not be opened".to_string(),
        ));
    }

    println!(
        "Watching {} for connectivity (Ctrl-C to stop)",
        ctx.config.remote.url
    );

    block_on(async move {
        let (monitor, events) = ConnectivityMonitor::new(probe, ctx.config.monitor.probe_interval());

        let cancel = monitor.cancel_token();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl-C");
                return;
            }
            cancel.cancel();
        });

        spawn_signal_trigger(monitor.trigger(), monitor.cancel_token());

        monitor.run(queue, events).await;
    })
}

#[cfg(unix)]
fn spawn_signal_trigger(trigger: OnlineTrigger, cancel: CancellationToken) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut usr1 = match signal(SignalKind::user_defined1()) {
        Ok(usr1) => usr1,
        Err(e) => {
            tracing::warn!(error = %e, "failed to listen for SIGUSR1");
            return;
        }
    };
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                received = usr1.recv() => match received {
                    Some(()) => {
                        tracing::info!("SIGUSR1 received, reporting connection");
                        trigger.notify_online();
                    }
                    None => return,
                },
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_signal_trigger(_trigger: OnlineTrigger, _cancel: CancellationToken) {}

/// Probe dialing the configured remote's host and port.
pub(crate) fn probe_for(config: &Config) -> Result<TcpProbe> {
    let addr = config
        .remote
        .probe_addr()
        .ok_or_else(|| Error::InvalidRemoteUrl(config.remote.url.clone()))?;
    Ok(TcpProbe::new(addr, config.monitor.probe_timeout()))
}

//! SSH sync-script generation.
//!
//! Pure string templating: builds a self-contained shell script that mirrors
//! a remote screenshot directory to the local machine over rsync/SSH, with
//! install/start/stop/status/run verbs for the platform service manager.
//! No runtime state and no error path beyond interpolation.

use crate::config::SyncConfig;

/// Generate the sync shell script.
///
/// # Arguments
/// * `sync` - Watch/remote directory and port settings
/// * `remote_host` - `user@host` target; the config's `remote_host` wins
///   when set
pub fn generate(sync: &SyncConfig, remote_host: &str) -> String {
    let host = sync.remote_host.as_deref().unwrap_or(remote_host);
    let watch_dir = &sync.watch_dir;
    let remote_dir = &sync.remote_dir;
    let port = sync.port;

    format!(
        r#"#!/usr/bin/env bash
# shotstage-sync: mirror {host}:{watch_dir} into {remote_dir}
set -euo pipefail

HOST="{host}"
PORT="{port}"
WATCH_DIR="{watch_dir}"
DEST_DIR="{remote_dir}"
INTERVAL="${{SHOTSTAGE_SYNC_INTERVAL:-2}}"
UNIT_NAME="shotstage-sync"

sync_once() {{
    rsync -az -e "ssh -p $PORT" \
        --include='*.png' --include='*.jpg' --include='*.jpeg' --include='*.webp' \
        --exclude='*' \
        "$HOST:$WATCH_DIR/" "$DEST_DIR/"
}}

run() {{
    mkdir -p "$DEST_DIR"
    echo "Syncing $HOST:$WATCH_DIR -> $DEST_DIR every ${{INTERVAL}}s (Ctrl-C to stop)"
    while true; do
        sync_once || echo "sync failed; retrying" >&2
        sleep "$INTERVAL"
    done
}}

install_service() {{
    if [ "$(uname)" = "Darwin" ]; then
        PLIST="$HOME/Library/LaunchAgents/com.shotstage.sync.plist"
        cat > "$PLIST" <<PLIST_EOF
<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0"><dict>
    <key>Label</key><string>com.shotstage.sync</string>
    <key>ProgramArguments</key><array>
        <string>$(realpath "$0")</string><string>run</string>
    </array>
    <key>RunAtLoad</key><true/>
    <key>KeepAlive</key><true/>
</dict></plist>
PLIST_EOF
        launchctl load "$PLIST"
        echo "Installed launchd agent com.shotstage.sync"
    else
        UNIT="$HOME/.config/systemd/user/$UNIT_NAME.service"
        mkdir -p "$(dirname "$UNIT")"
        cat > "$UNIT" <<UNIT_EOF
[Unit]
Description=shotstage screenshot sync ($HOST)

[Service]
ExecStart=$(realpath "$0") run
Restart=always

[Install]
WantedBy=default.target
UNIT_EOF
        systemctl --user daemon-reload
        systemctl --user enable --now "$UNIT_NAME.service"
        echo "Installed systemd user unit $UNIT_NAME.service"
    fi
}}

case "${{1:-run}}" in
    run) run ;;
    once) sync_once ;;
    install) install_service ;;
    start)
        if [ "$(uname)" = "Darwin" ]; then launchctl start com.shotstage.sync
        else systemctl --user start "$UNIT_NAME.service"; fi ;;
    stop)
        if [ "$(uname)" = "Darwin" ]; then launchctl stop com.shotstage.sync
        else systemctl --user stop "$UNIT_NAME.service"; fi ;;
    status)
        if [ "$(uname)" = "Darwin" ]; then launchctl list | grep com.shotstage.sync || true
        else systemctl --user status "$UNIT_NAME.service" --no-pager || true; fi ;;
    *) echo "Usage: $0 {{run|once|install|start|stop|status}}" >&2; exit 1 ;;
esac
"#
    )
}

/// One shell line that writes the script to disk and makes it executable.
pub fn install_one_liner(sync: &SyncConfig, remote_host: &str) -> String {
    let target = "~/.local/bin/shotstage-sync";
    format!(
        "shotstage sync-script --host {} > {target} && chmod +x {target}",
        sync.remote_host.as_deref().unwrap_or(remote_host)
    )
}

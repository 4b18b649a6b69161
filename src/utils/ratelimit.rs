use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use lazy_static::lazy_static;
use tokio::sync::Mutex;

lazy_static! {
    static ref COMMAND_COOLDOWNS: Mutex<HashMap<(i64, String), u64>> =
        Mutex::new(HashMap::new());

    // Track when we last warned a user about cooldown (to avoid message spam)
    // Key: (user_id, command), Value: timestamp of last warning
    static ref COOLDOWN_WARNINGS: Mutex<HashMap<(i64, String), u64>> =
        Mutex::new(HashMap::new());

    // Global rate limiting: tracks request timestamps for sliding window (1 second window)
    static ref GLOBAL_REQUESTS: Mutex<Vec<u64>> = Mutex::new(Vec::new());
}

const COOLDOWN_SECONDS: u64 = 5;
// Telegram allows ~30 outgoing messages per second bot-wide; stay under it
const GLOBAL_RATE_LIMIT: u64 = 25;
const RATE_WINDOW_MS: u64 = 1000;

/// Check if a user can execute a command (cooldown not active)
/// Returns Ok(()) if cooldown has passed
/// Returns Err((remaining_seconds, should_send_warning_message)) if still on cooldown
/// The boolean indicates if we should send a warning (true on first violation, false on retries)
pub async fn check_cooldown(user_id: i64, command: &str) -> Result<(), (u64, bool)> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let key = (user_id, command.to_string());

    let mut cooldowns = COMMAND_COOLDOWNS.lock().await;
    if let Some(&last_time) = cooldowns.get(&key) {
        let elapsed = now.saturating_sub(last_time);
        if elapsed < COOLDOWN_SECONDS {
            let remaining = COOLDOWN_SECONDS - elapsed;

            // Only warn once per cooldown period
            let mut warnings = COOLDOWN_WARNINGS.lock().await;
            let should_warn = warnings
                .get(&key)
                .map(|&last_warning| last_warning < last_time)
                .unwrap_or(true);

            if should_warn {
                warnings.insert(key, now);
            }

            return Err((remaining, should_warn));
        }
    }

    cooldowns.insert(key, now);
    Ok(())
}

/// Check global rate limit across all users
/// Returns Ok(()) if under limit, Err(remaining_ms) if rate limit exceeded
pub async fn check_global_rate_limit() -> Result<(), u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    let window_start = now.saturating_sub(RATE_WINDOW_MS);

    let mut requests = GLOBAL_REQUESTS.lock().await;

    // Remove requests outside the window
    requests.retain(|&timestamp| timestamp > window_start);

    if requests.len() >= GLOBAL_RATE_LIMIT as usize {
        // Calculate when the oldest request will leave the window
        let oldest_request = requests.first().copied().unwrap_or(now);
        let oldest_leaves_at = oldest_request + RATE_WINDOW_MS;
        Err(oldest_leaves_at.saturating_sub(now))
    } else {
        requests.push(now);
        Ok(())
    }
}

/// Get the cooldown seconds constant
pub fn get_cooldown_seconds() -> u64 {
    COOLDOWN_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_call_passes_then_cools_down() {
        let user = 424_242;

        assert!(check_cooldown(user, "/p2p").await.is_ok());

        match check_cooldown(user, "/p2p").await {
            Err((remaining, should_warn)) => {
                assert!(remaining <= COOLDOWN_SECONDS);
                assert!(should_warn);
            }
            Ok(()) => panic!("second call within the window should be on cooldown"),
        }

        // A different command is tracked separately
        assert!(check_cooldown(user, "/coin").await.is_ok());
    }
}

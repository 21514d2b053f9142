//! Shared constants used across the application

/// Base URL used when neither the config file nor `--endpoint` names one.
/// Matches the stock development address of ask-protocol services.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Path of the question-answering endpoint, relative to the base URL.
pub const ASK_PATH: &str = "ask";

/// Default delay between typewriter reveal steps.
pub const DEFAULT_TYPING_INTERVAL_MS: u64 = 10;

/// How long a status toast stays visible before expiring.
pub const STATUS_TOAST_MS: u64 = 2000;

/// Dialog text when a request fails and the server gave us nothing usable.
pub const GENERIC_REQUEST_ERROR: &str = "Failed to get response";

/// Dialog text when handing text to the system clipboard fails.
pub const GENERIC_COPY_ERROR: &str = "Failed to copy text to clipboard";

/// Notice shown once at startup.
pub const STARTUP_NOTICE: &str = "The assistant keeps no long-term memory between questions. \
Ask complete, self-contained questions that carry all the details in one message.";

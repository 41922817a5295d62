pub mod core {
    pub mod config;
    pub mod error;
    pub mod state;
    pub mod routes;
    pub mod startup;
    pub mod tracing_init;
}

pub mod models {
    pub mod api;
    pub mod session;
    pub mod user;
}

pub mod stores {
    pub mod credential_store;
    pub mod session_store;
}

pub mod recommend {
    pub mod mapper;
    pub mod search;
}

pub mod capture {
    pub mod classifier;
    pub mod frame_source;
    pub mod launcher;
}

pub mod validation {
    pub mod fields;
}

pub mod utils {
    pub mod auth;
    pub mod time;
}

pub mod handlers {
    pub mod account;
    pub mod emotion;
    pub mod fallback;
    pub mod health;
    pub mod session;
}

#[cfg(test)]
mod testing;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_file: String,
    pub public_dir: String,
    pub staff_username: String,
    pub staff_password: String,
    pub session_max_age_hours: i64,
}

impl Config {
    pub fn init() -> Config {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(3000);
        let data_file =
            std::env::var("TICKETS_FILE").unwrap_or_else(|_| "tickets.json".to_string());
        let public_dir = std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());
        let staff_username =
            std::env::var("STAFF_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let staff_password =
            std::env::var("STAFF_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
        let session_max_age_hours = std::env::var("SESSION_MAX_AGE_HOURS")
            .ok()
            .and_then(|hours| hours.parse::<i64>().ok())
            .unwrap_or(24);

        Config {
            port,
            data_file,
            public_dir,
            staff_username,
            staff_password,
            session_max_age_hours,
        }
    }
}

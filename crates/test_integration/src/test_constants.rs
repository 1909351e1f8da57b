pub const PASSWORD: &str = "correct-horse-battery-staple";

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_NAME: &str = "Marketplace Admin";

pub const BRAND_EMAIL: &str = "brand@example.com";
pub const BRAND_NAME: &str = "Acme Beverages";

pub const INFLUENCER_EMAIL: &str = "creator@example.com";
pub const INFLUENCER_NAME: &str = "Priya Creates";

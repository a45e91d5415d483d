pub const BCRYPT_COST: u32 = 10;
pub const JWT_EXPIRATION_SECONDS: usize = 60 * 60 * 24;
pub const USER_EXISTS_MESSAGE: &str = "User already exists";

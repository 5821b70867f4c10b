// Policy engine - pure security decisions, no persistence

pub mod lockout;
pub mod otp;

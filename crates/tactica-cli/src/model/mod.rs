pub mod calibration_record;
pub mod scenario;

pub mod logging;
pub mod p3dimg;

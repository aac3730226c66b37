// Domain 層：模型與 ports，具體實作放在 adapters/

pub mod model;
pub mod ports;

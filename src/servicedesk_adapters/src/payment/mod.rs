pub mod iyzico_gateway;

pub use iyzico_gateway::IyzicoPaymentGateway;

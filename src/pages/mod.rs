pub mod cuentas;
pub mod pagos;
pub mod sucursales;

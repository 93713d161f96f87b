/// Errors that can occur during bus arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The bus is currently granted to another holder.
    Contended,
}

//! End-to-end checks of scriptor against real editor output.

#[cfg(test)]
mod conversion;
#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod readme;

/// Raw values straight from the environmental sensor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurement {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
}

/// The attached environmental sensor.
///
/// `read` blocks for the duration of one forced conversion, typically well
/// under a second.
pub trait Sensor {
    type Error: core::fmt::Debug;

    fn read(&mut self) -> Result<Measurement, Self::Error>;
}

impl<S: Sensor + ?Sized> Sensor for &mut S {
    type Error = S::Error;

    fn read(&mut self) -> Result<Measurement, Self::Error> {
        (**self).read()
    }
}

use bytes::{Buf, BufMut};

use crate::WireError;

/// Size of an encoded [`SensorReading`]: `1 + 4 + 4 + 4`, no padding.
pub const READING_LEN: usize = 13;

/// One environmental sample as it travels over the air.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SensorReading {
    pub location_id: u8,
    /// Degrees Celsius.
    pub temperature: f32,
    /// Percent relative humidity.
    pub humidity: f32,
    /// Hectopascals.
    pub pressure: f32,
}

impl SensorReading {
    pub const fn new(location_id: u8, temperature: f32, humidity: f32, pressure: f32) -> Self {
        Self {
            location_id,
            temperature,
            humidity,
            pressure,
        }
    }

    /// Marker sent in place of a sample the sensor failed to produce.
    ///
    /// Keeps the 13 byte layout so the receiver needs no format change to
    /// tell a failed sample apart; see [`SensorReading::is_valid`].
    pub const fn invalid(location_id: u8) -> Self {
        Self::new(location_id, f32::NAN, f32::NAN, f32::NAN)
    }

    pub fn is_valid(&self) -> bool {
        self.temperature.is_finite() && self.humidity.is_finite() && self.pressure.is_finite()
    }

    pub fn to_bytes(&self) -> [u8; READING_LEN] {
        let mut buf = [0u8; READING_LEN];
        let mut out = &mut buf[..];
        out.put_u8(self.location_id);
        out.put_f32_le(self.temperature);
        out.put_f32_le(self.humidity);
        out.put_f32_le(self.pressure);
        buf
    }

    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() != READING_LEN {
            return Err(WireError::Length {
                expected: READING_LEN,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            location_id: bytes.get_u8(),
            temperature: bytes.get_f32_le(),
            humidity: bytes.get_f32_le(),
            pressure: bytes.get_f32_le(),
        })
    }
}

impl TryFrom<&[u8]> for SensorReading {
    type Error = WireError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<SensorReading> for [u8; READING_LEN] {
    fn from(reading: SensorReading) -> Self {
        reading.to_bytes()
    }
}

pub fn encode(reading: &SensorReading) -> [u8; READING_LEN] {
    reading.to_bytes()
}

/// Decode a datagram payload. Anything but exactly [`READING_LEN`] bytes is
/// rejected before a single field is read.
pub fn decode(bytes: &[u8]) -> Result<SensorReading, WireError> {
    SensorReading::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SensorReading {
        SensorReading::new(1, 23.53, 51.63, 1008.15)
    }

    fn same_bits(a: &SensorReading, b: &SensorReading) -> bool {
        a.location_id == b.location_id
            && a.temperature.to_bits() == b.temperature.to_bits()
            && a.humidity.to_bits() == b.humidity.to_bits()
            && a.pressure.to_bits() == b.pressure.to_bits()
    }

    #[test]
    fn layout_is_packed_little_endian() {
        let bytes = encode(&sample());

        assert_eq!(bytes.len(), READING_LEN);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1..5], 23.53f32.to_le_bytes());
        assert_eq!(bytes[5..9], 51.63f32.to_le_bytes());
        assert_eq!(bytes[9..13], 1008.15f32.to_le_bytes());
    }

    #[test]
    fn decodes_known_datagram() {
        let mut datagram = [0u8; READING_LEN];
        datagram[0] = 1;
        datagram[1..5].copy_from_slice(&23.53f32.to_le_bytes());
        datagram[5..9].copy_from_slice(&51.63f32.to_le_bytes());
        datagram[9..13].copy_from_slice(&1008.15f32.to_le_bytes());

        let reading = decode(&datagram).unwrap();
        assert_eq!(reading.location_id, 1);
        assert_eq!(reading.temperature, 23.53);
        assert_eq!(reading.humidity, 51.63);
        assert_eq!(reading.pressure, 1008.15);
    }

    #[test]
    fn round_trip_preserves_bits() {
        let readings = [
            sample(),
            SensorReading::new(0, -40.0, 0.0, 300.0),
            SensorReading::new(u8::MAX, f32::MAX, f32::MIN_POSITIVE, -0.0),
            SensorReading::invalid(7),
        ];

        for reading in readings {
            let decoded = decode(&encode(&reading)).unwrap();
            assert!(same_bits(&reading, &decoded), "{reading:?} != {decoded:?}");
        }
    }

    #[test]
    fn rejects_wrong_lengths() {
        let bytes = encode(&sample());

        for len in [0, 1, 11, 12] {
            assert_eq!(
                decode(&bytes[..len]),
                Err(WireError::Length {
                    expected: READING_LEN,
                    actual: len
                })
            );
        }

        let mut long = [0u8; 14];
        long[..READING_LEN].copy_from_slice(&bytes);
        assert!(SensorReading::try_from(&long[..]).is_err());
    }

    #[test]
    fn sentinel_is_flagged_invalid() {
        assert!(sample().is_valid());
        assert!(!SensorReading::invalid(1).is_valid());

        let partial = SensorReading::new(1, 21.0, f32::INFINITY, 1000.0);
        assert!(!partial.is_valid());
    }
}

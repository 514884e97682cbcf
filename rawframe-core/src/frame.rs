use std::fmt::Debug;

use arrayvec::ArrayVec;

use crate::error::{Error, Field};
use crate::protocol::*;
use crate::Result;

/// An Ethernet II frame, laid out exactly as it goes onto the wire.
///
/// The frame check sequence is never computed here. It is either left to
/// the NIC or supplied by the caller as a [`Trailer`].
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    buf: ArrayVec<u8, MAX_FRAME_LEN>,
    has_trailer: bool,
}

impl Frame {
    pub fn new(header: EthHeader, payload: &[u8], trailer: Option<Trailer>) -> Result<Self> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::invalid_len(Field::Payload, payload.len()));
        }

        let mut buf = ArrayVec::new();
        // capacity is checked above, so none of these can overflow
        buf.extend(header.to_bytes());
        buf.extend(payload.iter().copied());
        if let Some(trailer) = trailer {
            buf.extend(trailer.as_bytes());
        }

        Ok(Self {
            buf,
            has_trailer: trailer.is_some(),
        })
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn dst(&self) -> MacAddr {
        MacAddr::from_bytes(self.array_at(0))
    }

    pub fn src(&self) -> MacAddr {
        MacAddr::from_bytes(self.array_at(MAC_ADDR_LEN))
    }

    pub fn ether_type(&self) -> EtherType {
        EtherType::from_be_bytes(self.array_at(2 * MAC_ADDR_LEN))
    }

    pub fn header(&self) -> EthHeader {
        EthHeader::new(self.dst(), self.src(), self.ether_type())
    }

    pub fn payload(&self) -> &[u8] {
        &self.buf[HEADER_LEN..self.len() - self.trailer_len()]
    }

    pub fn trailer(&self) -> Option<Trailer> {
        self.has_trailer
            .then(|| Trailer::from_bytes(self.array_at(self.len() - TRAILER_LEN)))
    }

    fn trailer_len(&self) -> usize {
        if self.has_trailer {
            TRAILER_LEN
        } else {
            0
        }
    }

    fn array_at<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut bytes = [0; N];
        bytes.copy_from_slice(&self.buf[offset..offset + N]);
        bytes
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("dst", &self.dst())
            .field("src", &self.src())
            .field("ether_type", &self.ether_type())
            .field("payload_len", &self.payload().len())
            .field("trailer", &self.trailer())
            .finish()
    }
}

/// Build a frame from untyped byte fields, checking every field's length.
pub fn build(
    dst: &[u8],
    src: &[u8],
    ether_type: &[u8],
    payload: &[u8],
    trailer: Option<&[u8]>,
) -> Result<Frame> {
    let dst = MacAddr::from_bytes(fixed(Field::Dst, dst)?);
    let src = MacAddr::from_bytes(fixed(Field::Src, src)?);
    let ether_ty = EtherType::from_be_bytes(fixed(Field::EtherType, ether_type)?);
    let trailer = trailer
        .map(|t| fixed(Field::Trailer, t).map(Trailer::from_bytes))
        .transpose()?;

    Frame::new(EthHeader::new(dst, src, ether_ty), payload, trailer)
}

fn fixed<const N: usize>(field: Field, bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| Error::invalid_len(field, bytes.len()))
}

#[cfg(test)]
mod test {
    use super::*;

    const MAC: [u8; 6] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];

    #[test]
    fn test_build_default_frame() {
        let payload = [b'P'; 100];
        let frame = build(&MAC, &MAC, &[0x08, 0x01], &payload, None).unwrap();
        let bytes = frame.as_bytes();

        assert_eq!(frame.len(), 114);
        assert_eq!(&bytes[0..6], &MAC);
        assert_eq!(&bytes[6..12], &MAC);
        assert_eq!(&bytes[12..14], &[0x08, 0x01]);
        assert!(bytes[14..].iter().all(|&b| b == 0x50));
        assert_eq!(frame.trailer(), None);
    }

    #[test]
    fn test_build_broadcast() {
        let frame = Frame::new(
            EthHeader::new(MacAddr::BROADCAST, MacAddr::from_bytes(MAC), EtherType::ARP),
            b"who has",
            None,
        )
        .unwrap();

        assert_eq!(&frame.as_bytes()[..6], &[0xff; 6]);
        assert!(frame.dst().is_broadcast());
    }

    #[test]
    fn test_build_with_trailer() {
        let trailer = [0x01, 0x02, 0x03, 0x04];
        let frame = build(&MAC, &[0xaa; 6], &[0x86, 0xdd], b"hello", Some(&trailer)).unwrap();

        assert_eq!(frame.len(), 14 + 5 + 4);
        assert_eq!(&frame.as_bytes()[19..], &trailer);
        assert_eq!(frame.trailer(), Some(Trailer::from_bytes(trailer)));
        assert_eq!(frame.payload(), b"hello");
    }

    #[test]
    fn test_split_recovers_fields() {
        for len in [0, 1, 46, 100, 1499, 1500] {
            let payload: Vec<u8> = (0..len).map(|i| i as u8).collect();
            for trailer in [None, Some([0xde, 0xad, 0xbe, 0xef])] {
                let frame = build(
                    &MAC,
                    &[0x3c, 0xfd, 0xfe, 0xbb, 0xca, 0x78],
                    &[0x12, 0x34],
                    &payload,
                    trailer.as_ref().map(|t| &t[..]),
                )
                .unwrap();

                let trailer_len = if trailer.is_some() { 4 } else { 0 };
                assert_eq!(frame.len(), 14 + len + trailer_len);
                assert_eq!(frame.dst().as_bytes(), MAC);
                assert_eq!(frame.src().as_bytes(), [0x3c, 0xfd, 0xfe, 0xbb, 0xca, 0x78]);
                assert_eq!(frame.ether_type(), EtherType::new(0x1234));
                assert_eq!(frame.payload(), &payload[..]);
                assert_eq!(frame.trailer().map(|t| t.as_bytes()), trailer);
            }
        }
    }

    #[test]
    fn test_build_is_pure() {
        let a = build(&MAC, &MAC, &[0x08, 0x00], b"abc", Some(&[9, 9, 9, 9])).unwrap();
        let b = build(&MAC, &MAC, &[0x08, 0x00], b"abc", Some(&[9, 9, 9, 9])).unwrap();

        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_invalid_field_length() {
        let err = build(&[1, 2, 3], &MAC, &[0x08, 0x01], b"", None).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFieldLength {
                field: Field::Dst,
                actual: 3
            }
        ));

        let err = build(&MAC, &[0; 7], &[0x08, 0x01], b"", None).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFieldLength {
                field: Field::Src,
                actual: 7
            }
        ));

        for ether_type in [&[][..], &[0x08][..], &[0x08, 0x00, 0x00][..]] {
            let err = build(&MAC, &MAC, ether_type, b"", None).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidFieldLength {
                    field: Field::EtherType,
                    ..
                }
            ));
        }

        for trailer in [&[][..], &[1, 2, 3][..], &[1, 2, 3, 4, 5][..]] {
            let err = build(&MAC, &MAC, &[0x08, 0x01], b"", Some(trailer)).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidFieldLength {
                    field: Field::Trailer,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_payload_too_large() {
        let err = build(&MAC, &MAC, &[0x08, 0x01], &[0; 1501], None).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFieldLength {
                field: Field::Payload,
                actual: 1501
            }
        ));

        // the largest frame still fits together with a trailer
        let frame = build(&MAC, &MAC, &[0x08, 0x01], &[0; 1500], Some(&[0; 4])).unwrap();
        assert_eq!(frame.len(), MAX_FRAME_LEN);
    }
}

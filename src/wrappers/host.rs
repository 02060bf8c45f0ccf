//! Host access list entries

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use libc::{c_char, c_int};

use crate::ffi;
use crate::types::HostFamily;

/// One entry of the server's access control list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAddress {
    family: HostFamily,
    address: Vec<u8>,
}

impl HostAddress {
    pub fn new(family: HostFamily, address: Vec<u8>) -> Self {
        HostAddress { family, address }
    }

    pub fn ipv4(addr: Ipv4Addr) -> Self {
        Self::new(HostFamily::Internet, addr.octets().to_vec())
    }

    pub fn ipv6(addr: Ipv6Addr) -> Self {
        Self::new(HostFamily::Internet6, addr.octets().to_vec())
    }

    pub fn from_ip(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Self::ipv4(v4),
            IpAddr::V6(v6) => Self::ipv6(v6),
        }
    }

    /// A server-interpreted entry such as `localuser:alice`. The address
    /// bytes are the type, a NUL, then the value.
    pub fn server_interpreted(kind: &str, value: &str) -> Self {
        let mut address = Vec::with_capacity(kind.len() + value.len() + 1);
        address.extend_from_slice(kind.as_bytes());
        address.push(0);
        address.extend_from_slice(value.as_bytes());
        Self::new(HostFamily::ServerInterpreted, address)
    }

    pub fn family(&self) -> HostFamily {
        self.family
    }

    pub fn address(&self) -> &[u8] {
        &self.address
    }

    pub fn as_ip(&self) -> Option<IpAddr> {
        match self.family {
            HostFamily::Internet => {
                let octets: [u8; 4] = self.address.as_slice().try_into().ok()?;
                Some(IpAddr::V4(Ipv4Addr::from(octets)))
            }
            HostFamily::Internet6 => {
                let octets: [u8; 16] = self.address.as_slice().try_into().ok()?;
                Some(IpAddr::V6(Ipv6Addr::from(octets)))
            }
            _ => None,
        }
    }

    /// Type and value of a server-interpreted entry
    pub fn as_server_interpreted(&self) -> Option<(&str, &str)> {
        if self.family != HostFamily::ServerInterpreted {
            return None;
        }
        let split = self.address.iter().position(|&b| b == 0)?;
        let kind = std::str::from_utf8(&self.address[..split]).ok()?;
        let value = std::str::from_utf8(&self.address[split + 1..]).ok()?;
        Some((kind, value))
    }

    /// Copy an entry returned by XListHosts.
    ///
    /// # Safety
    /// `raw.address` must point to `raw.length` readable bytes, or to an
    /// `XServerInterpretedAddress` for that family.
    pub unsafe fn from_raw(raw: &ffi::XHostAddress) -> Option<Self> {
        let family = HostFamily::from_raw(raw.family)?;
        if raw.address.is_null() {
            return Some(Self::new(family, Vec::new()));
        }
        if family == HostFamily::ServerInterpreted {
            let si = &*(raw.address as *const ffi::XServerInterpretedAddress);
            let kind = bytes(si.type_, si.typelength);
            let value = bytes(si.value, si.valuelength);
            let mut address = kind;
            address.push(0);
            address.extend_from_slice(&value);
            return Some(Self::new(family, address));
        }
        Some(Self::new(family, bytes(raw.address, raw.length)))
    }

    /// Build the C form of this entry and pass it to `f`. The pointer is only
    /// valid during the call.
    pub fn with_raw<R>(&self, f: impl FnOnce(*mut ffi::XHostAddress) -> R) -> R {
        let mut data = self.address.clone();
        if self.family == HostFamily::ServerInterpreted {
            let split = data.iter().position(|&b| b == 0).unwrap_or(data.len());
            let (kind, rest) = data.split_at_mut(split);
            let value: &mut [u8] = if rest.is_empty() { rest } else { &mut rest[1..] };
            let mut si = ffi::XServerInterpretedAddress {
                typelength: kind.len() as c_int,
                valuelength: value.len() as c_int,
                type_: kind.as_mut_ptr() as *mut c_char,
                value: value.as_mut_ptr() as *mut c_char,
            };
            let mut raw = ffi::XHostAddress {
                family: self.family.to_raw(),
                length: std::mem::size_of::<ffi::XServerInterpretedAddress>() as c_int,
                address: &mut si as *mut ffi::XServerInterpretedAddress as *mut c_char,
            };
            return f(&mut raw);
        }
        let mut raw = ffi::XHostAddress {
            family: self.family.to_raw(),
            length: data.len() as c_int,
            address: data.as_mut_ptr() as *mut c_char,
        };
        f(&mut raw)
    }
}

unsafe fn bytes(ptr: *const c_char, len: c_int) -> Vec<u8> {
    if ptr.is_null() || len <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr as *const u8, len as usize).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_addresses() {
        let host = HostAddress::ipv4(Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(host.family(), HostFamily::Internet);
        assert_eq!(host.as_ip(), Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10))));

        let host = HostAddress::from_ip(IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(host.family(), HostFamily::Internet6);
        assert_eq!(host.address().len(), 16);
    }

    #[test]
    fn test_server_interpreted() {
        let host = HostAddress::server_interpreted("localuser", "alice");
        assert_eq!(host.as_server_interpreted(), Some(("localuser", "alice")));
        assert_eq!(host.as_ip(), None);

        let copy = host.with_raw(|raw| unsafe { HostAddress::from_raw(&*raw) });
        assert_eq!(copy, Some(host));
    }

    #[test]
    fn test_raw_round_trip() {
        let host = HostAddress::ipv4(Ipv4Addr::new(10, 0, 0, 1));
        let copy = host.with_raw(|raw| unsafe { HostAddress::from_raw(&*raw) });
        assert_eq!(copy, Some(host));
    }
}

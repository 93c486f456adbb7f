//! Running CRC-16 accumulator.
//!
//! A [`CrcAlgorithm`] pairs a parameter set with its lookup table, built at
//! compile time when declared as a `static`. Engines borrow an algorithm, so
//! the table is shared by every frame and only the 16-bit accumulator is
//! per-instance state.

/// Parameters of a 16-bit CRC in the usual catalogue notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrcParams {
    /// Register width in bits. Only 16 is supported.
    pub width: u8,
    /// Generator polynomial, normal (MSB-first) form.
    pub poly: u16,
    /// Register value before the first byte.
    pub init: u16,
    /// Process input bytes LSB first.
    pub reflect_in: bool,
    /// Bit-reverse the register before the final XOR.
    pub reflect_out: bool,
    /// Value XORed into the register to produce the digest.
    pub xor_out: u16,
}

/// The frame checksum: poly 0x1021, init 0xFFFF, reflected in and out, final XOR 0xFFFF.
pub const MCRF4XX: CrcParams = CrcParams {
    width: 16,
    poly: 0x1021,
    init: 0xFFFF,
    reflect_in: true,
    reflect_out: true,
    xor_out: 0xFFFF,
};

/// The frame checksum algorithm used by [`ChecksumEngine::new`].
pub static FRAME_CRC: CrcAlgorithm = CrcAlgorithm::new(MCRF4XX);

/// A CRC-16 parameter set with its precomputed lookup table.
#[derive(Debug, Clone)]
pub struct CrcAlgorithm {
    params: CrcParams,
    table: [u16; 256],
}

impl CrcAlgorithm {
    /// Build the lookup table for `params`. Usable in `static` initializers.
    pub const fn new(params: CrcParams) -> Self {
        let table = make_table(&params);
        Self { params, table }
    }

    pub fn params(&self) -> &CrcParams {
        &self.params
    }
}

const fn make_table(params: &CrcParams) -> [u16; 256] {
    let mut table = [0u16; 256];
    let reflected_poly = params.poly.reverse_bits();
    let mut i = 0;
    while i < 256 {
        let mut crc = if params.reflect_in {
            i as u16
        } else {
            (i as u16) << 8
        };
        let mut bit = 0;
        while bit < 8 {
            crc = if params.reflect_in {
                if crc & 1 != 0 {
                    (crc >> 1) ^ reflected_poly
                } else {
                    crc >> 1
                }
            } else if crc & 0x8000 != 0 {
                (crc << 1) ^ params.poly
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Stateful CRC-16 accumulator.
///
/// `update` is order-sensitive: folding the same bytes twice is not the same
/// as folding them once. Callers must feed exactly the covered bytes, once,
/// in wire order.
#[derive(Debug, Clone)]
pub struct ChecksumEngine {
    algorithm: &'static CrcAlgorithm,
    acc: u16,
}

impl ChecksumEngine {
    /// Create an engine using the frame checksum.
    pub fn new() -> Self {
        Self::with_algorithm(&FRAME_CRC)
    }

    /// Create an engine for another CRC-16 variant.
    pub fn with_algorithm(algorithm: &'static CrcAlgorithm) -> Self {
        let mut engine = Self { algorithm, acc: 0 };
        engine.reset();
        engine
    }

    /// Algorithm parameters in use.
    pub fn params(&self) -> &'static CrcParams {
        &self.algorithm.params
    }

    /// Reinitialize the accumulator.
    pub fn reset(&mut self) {
        let params = self.params();
        self.acc = if params.reflect_in {
            params.init.reverse_bits()
        } else {
            params.init
        };
    }

    /// Fold `bytes` into the accumulator.
    pub fn update(&mut self, bytes: &[u8]) {
        let table = &self.algorithm.table;
        let mut crc = self.acc;
        if self.algorithm.params.reflect_in {
            for &b in bytes {
                crc = (crc >> 8) ^ table[usize::from((crc ^ u16::from(b)) & 0xFF)];
            }
        } else {
            for &b in bytes {
                crc = (crc << 8) ^ table[usize::from(((crc >> 8) ^ u16::from(b)) & 0xFF)];
            }
        }
        self.acc = crc;
    }

    /// The digest of everything folded since the last reset. Does not mutate state.
    pub fn value(&self) -> u16 {
        let params = self.params();
        // The register is held in input bit order; flip only when output order differs.
        let out = if params.reflect_in != params.reflect_out {
            self.acc.reverse_bits()
        } else {
            self.acc
        };
        out ^ params.xor_out
    }
}

impl Default for ChecksumEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot digest of `bytes`.
pub fn checksum(bytes: &[u8]) -> u16 {
    let mut engine = ChecksumEngine::new();
    engine.update(bytes);
    engine.value()
}

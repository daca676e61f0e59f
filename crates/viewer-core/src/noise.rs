use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Grey RGBA8 noise, `size * size` texels, used to dither away banding in
/// dark gradients. Same seed, same texture.
pub fn noise_rgba(size: u32, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let texels = (size as usize) * (size as usize);
    let mut out = Vec::with_capacity(texels * 4);
    for _ in 0..texels {
        let v: u8 = rng.gen();
        out.extend_from_slice(&[v, v, v, 255]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texels_are_opaque_grey() {
        let data = noise_rgba(8, 7);
        assert_eq!(data.len(), 8 * 8 * 4);
        for px in data.chunks_exact(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn seeded_output_is_stable() {
        assert_eq!(noise_rgba(16, 42), noise_rgba(16, 42));
        assert_ne!(noise_rgba(16, 42), noise_rgba(16, 43));
    }
}

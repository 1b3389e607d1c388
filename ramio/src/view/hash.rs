// SPDX-License-Identifier: Apache-2.0

#![cfg(feature = "hash")]

use digest::{Digest, Output};
use super::View;

macro_rules! hash {
    ($sec:tt$feature:literal$module:ident
	$($size_name:literal$size_fn:ident$size_hasher:ident)+
	) => {
		$(
		hash! {
			$sec
			$size_name
			#[cfg(feature = $feature)]
			pub fn $size_fn(&self) -> Vec<u8> {
				self.hash::<$module::$size_hasher>().to_vec()
			}
		}
		)+
	};
    (secure $name:literal$method:item) => {
		/// Computes a
		#[doc = $name]
		/// hash of the viewed bytes. There are no known attacks on this hash
		/// function; it can be considered suitable for cryptography.
		$method
	};
    (broken $name:literal$method:item) => {
		/// Computes a
		#[doc = $name]
		/// hash of the viewed bytes. This hash function has been broken; its use in
		/// cryptography is ***not*** secure. Use for checksums only.
		$method
	};
}

impl View<'_> {
	/// Hashes the viewed bytes with `D`, returning the hash.
	pub fn hash<D: Digest>(&self) -> Output<D> {
		D::new()
			.chain_update(self.as_slice())
			.finalize()
	}

	/// Feeds the viewed bytes into `digest`.
	pub fn hash_into<D: Digest>(&self, digest: &mut D) {
		digest.update(self.as_slice())
	}

	hash! {
		secure "groestl" groestl
		"Grøstl-224" groestl224 Groestl224
		"Grøstl-256" groestl256 Groestl256
		"Grøstl-384" groestl384 Groestl384
		"Grøstl-512" groestl512 Groestl512
	}

	hash! {
		broken "md5" md5
		"MD5" md5 Md5
	}

	hash! {
		broken "sha1" sha1
		"SHA1" sha1 Sha1
	}

	hash! {
		secure "sha2" sha2
		"SHA-224" sha224 Sha224
		"SHA-256" sha256 Sha256
		"SHA-384" sha384 Sha384
		"SHA-512" sha512 Sha512
	}

	hash! {
		secure "sha3" sha3
		"SHA3-224 (Keccak)" sha3_224 Sha3_224
		"SHA3-256 (Keccak)" sha3_256 Sha3_256
		"SHA3-384 (Keccak)" sha3_384 Sha3_384
		"SHA3-512 (Keccak)" sha3_512 Sha3_512
	}

	hash! {
		secure "shabal" shabal
		"Shabal-192" shabal192 Shabal192
		"Shabal-224" shabal224 Shabal224
		"Shabal-256" shabal256 Shabal256
		"Shabal-384" shabal384 Shabal384
		"Shabal-512" shabal512 Shabal512
	}

	hash! {
		secure "whirlpool" whirlpool
		"Whirlpool" whirlpool Whirlpool
	}
}

#[cfg(all(test, feature = "sha2"))]
mod test {
	use base16ct::lower::encode_string;
	use digest::Digest;
	use pretty_assertions::assert_eq;
	use crate::RamStream;

	const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

	#[test]
	fn sha256_of_view() {
		let stream = RamStream::from_slice(b"abc").unwrap();
		let view = stream.view().unwrap();
		assert_eq!(encode_string(&view.sha256()), ABC_SHA256);
		assert_eq!(view.hash::<sha2::Sha256>().as_slice(), &view.sha256()[..]);
	}

	#[test]
	fn hash_into_streams_views() {
		let a = RamStream::from_slice(b"a").unwrap();
		let bc = RamStream::from_slice(b"bc").unwrap();
		let mut digest = sha2::Sha256::new();
		a.view().unwrap().hash_into(&mut digest);
		bc.view().unwrap().hash_into(&mut digest);
		assert_eq!(encode_string(&digest.finalize()), ABC_SHA256);
	}
}

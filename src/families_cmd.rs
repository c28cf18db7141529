//! Families command: list the wavelet families the denoiser accepts.

use anyhow::Result;

use wavematch_detect::WaveletFamily;

pub fn run() -> Result<()> {
    println!("{:<10} {:>6}  orthogonal", "family", "taps");
    for family in WaveletFamily::all() {
        let orthogonal = if family.is_orthogonal() { "yes" } else { "no" };
        println!("{:<10} {:>6}  {orthogonal}", family.to_string(), family.filter_length());
    }
    Ok(())
}

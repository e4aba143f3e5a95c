use fasub_rs::{FastaReader, Records};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::io::{BufReader, Write};
use tempfile::NamedTempFile;

const BASES: &[u8] = b"ACGTN";

/// Random multi-line FASTA with varying line widths and line endings
fn create_random_fasta(rng: &mut impl Rng, records: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    for i in 0..records {
        let eol = if rng.gen_bool(0.2) { "\r\n" } else { "\n" };
        write!(file, ">rec{} len={}{}", i, i * 7, eol).unwrap();

        let seq_len = rng.gen_range(0..400);
        let width = rng.gen_range(1..120);
        let sequence: Vec<u8> = (0..seq_len)
            .map(|_| BASES[rng.gen_range(0..BASES.len())])
            .collect();
        for line in sequence.chunks(width) {
            file.write_all(line).unwrap();
            file.write_all(eol.as_bytes()).unwrap();
        }
    }

    file.flush().unwrap();
    file
}

#[test]
fn test_comprehensive_random_access() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2024);

    for round in 0..5 {
        let fasta_file = create_random_fasta(&mut rng, 50);

        let expected: Vec<_> = Records::new(BufReader::new(fasta_file.reopen().unwrap()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let mut reader = FastaReader::open(fasta_file.path()).unwrap();
        assert_eq!(reader.index().len(), expected.len());

        let mut order: Vec<usize> = (0..expected.len()).collect();
        order.shuffle(&mut rng);

        for i in order {
            let record = reader.fetch_record(&format!("rec{}", i)).unwrap();
            assert_eq!(
                record, expected[i],
                "Round {}: mismatch for rec{}",
                round, i
            );
        }
    }
}

#[test]
fn test_repeated_fetches_are_stable() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let fasta_file = create_random_fasta(&mut rng, 10);
    let mut reader = FastaReader::open(fasta_file.path()).unwrap();

    let first = reader.fetch_record("rec9").unwrap();
    reader.fetch_record("rec0").unwrap();
    let again = reader.fetch_record("rec9").unwrap();
    assert_eq!(first, again);
}

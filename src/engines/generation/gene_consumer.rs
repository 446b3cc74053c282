/// Deterministically consumes selectors from a chromosome, wrapping at the end
pub struct GeneConsumer<'a> {
    genes: &'a [u32],
    position: usize,
    consumed: usize,
}

impl<'a> GeneConsumer<'a> {
    /// Returns `None` for an empty gene sequence, which has nothing to cycle over
    pub fn new(genes: &'a [u32]) -> Option<Self> {
        if genes.is_empty() {
            return None;
        }
        Some(Self {
            genes,
            position: 0,
            consumed: 0,
        })
    }

    /// Consume next gene and return value
    pub fn consume(&mut self) -> u32 {
        if self.position >= self.genes.len() {
            // Wrap around if genome exhausted
            self.position = 0;
        }

        let gene = self.genes[self.position];
        self.position += 1;
        self.consumed += 1;
        gene
    }

    /// Total genes consumed, counting wrapped reads
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Whether any gene has been read more than once
    pub fn has_wrapped(&self) -> bool {
        self.consumed > self.genes.len()
    }
}

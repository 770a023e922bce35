use docsim::{Corpus, Document};

fn main() {
    // build corpus
    let mut corpus = Corpus::with_documents([
        Document::new("systems", "Rust is a fast systems programming language"),
        Document::new("memory", "Rust guarantees memory safety without a garbage collector"),
        Document::new("scripting", "Python is a popular scripting language"),
        Document::new("cooking", "Slice the onions and brown them slowly in butter"),
    ]);

    // rank every document's neighbors
    let rankings = corpus.evaluate();
    println!("Rankings: \n{:#?}", rankings);

    for (id, hits) in rankings.iter() {
        match hits.first() {
            Some(best) => println!("{id}: closest is {} ({:.4})", best.id, best.score),
            None => println!("{id}: no neighbors"),
        }
    }

    // per-document term weights
    if let Some(scores) = corpus.tfidf_scores("systems") {
        println!("\nterm weights for \"systems\":");
        for (term, score) in &scores {
            println!("    {term}: {score:.4}");
        }
    }
}

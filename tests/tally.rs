use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand_core::OsRng;
use tokio::sync::mpsc;

use tally_decrypt::{
    combine_partial_decryptions, decrypt, k256::ProductionParams, make_key_shares, solve_brute_force, Ciphertext,
    DiscreteLogStrategy, Error, MemoryStore, Participant, Point, ShareId, State, TallyConfig, Vote,
};

type P = ProductionParams;

type Request = Point<P>;
type Response = (ShareId, Point<P>);

/// A decryption participant answering requests for partial decryptions.
async fn participant_node(participant: Participant<P>, mut rx: mpsc::Receiver<Request>, tx: mpsc::Sender<Response>) {
    while let Some(c1) = rx.recv().await {
        let partial = participant.compute_partial_decryption(&c1);
        tx.send((participant.id(), partial)).await.unwrap();
    }
}

/// Sends `c1` to every participant in the quorum and collects their partial decryptions.
async fn collect_partial_decryptions(quorum: &[Participant<P>], c1: &Point<P>) -> BTreeMap<ShareId, Point<P>> {
    let (response_tx, mut response_rx) = mpsc::channel::<Response>(quorum.len());

    let mut handles = Vec::with_capacity(quorum.len());
    let mut request_txs = Vec::with_capacity(quorum.len());
    for participant in quorum.iter().cloned() {
        let (request_tx, request_rx) = mpsc::channel::<Request>(1);
        handles.push(tokio::spawn(participant_node(participant, request_rx, response_tx.clone())));
        request_txs.push(request_tx);
    }
    drop(response_tx);

    for request_tx in request_txs.iter() {
        request_tx.send(*c1).await.unwrap();
    }
    // Closing the request channels lets the nodes finish.
    drop(request_txs);

    let mut partials = BTreeMap::new();
    while let Some((id, partial)) = response_rx.recv().await {
        partials.insert(id, partial);
    }
    for handle in handles {
        handle.await.unwrap();
    }
    partials
}

fn config(strategy: DiscreteLogStrategy) -> TallyConfig {
    let mut config = TallyConfig::new(1_000);
    config.dlog.strategy = strategy;
    config.dlog.workers = 4;
    config.vote_batch_size = 4;
    config
}

#[tokio::test]
async fn tally_with_overwrites() {
    let (participants, public_key) = make_key_shares::<P>(&mut OsRng, 3, 5).unwrap();
    let config = config(DiscreteLogStrategy::BabyStepGiantStep);
    let mut state = State::<P, _>::from_config(MemoryStore::new(), &config).unwrap();

    let ballots: &[(&[u8], u64)] = &[(b"alice", 3), (b"bob", 5), (b"carol", 7), (b"dave", 11)];

    state.start_batch().unwrap();
    for (nullifier, value) in ballots {
        let vote = Vote::new(*nullifier, public_key.encrypt(&mut OsRng, *value), b"0xaddress".as_slice());
        state.add_vote(vote).unwrap();
    }
    let first = state.commit_batch().unwrap();
    assert_eq!(first.ballot_count(), 4);
    assert_eq!(first.overwrite_count(), 0);

    // Bob changes his mind.
    state.start_batch().unwrap();
    let vote = Vote::new(b"bob".as_slice(), public_key.encrypt(&mut OsRng, 2), b"0xaddress".as_slice());
    state.add_vote(vote).unwrap();
    let second = state.commit_batch().unwrap();
    assert_eq!(second.overwrite_count(), 1);

    let tally: Ciphertext<P> = first.ballot_sum() + second.ballot_sum();
    let overwrites = second.overwrite_sum();

    let quorum = participants.choose_multiple(&mut OsRng, 3).cloned().collect::<Vec<_>>();
    let ids = quorum.iter().map(|participant| participant.id()).collect::<Vec<_>>();

    let all_votes = decrypt(
        &tally,
        &collect_partial_decryptions(&quorum, &tally.c1).await,
        &ids,
        &config.dlog,
    )
    .unwrap();
    let replaced = decrypt(
        overwrites,
        &collect_partial_decryptions(&quorum, &overwrites.c1).await,
        &ids,
        &config.dlog,
    )
    .unwrap();

    assert_eq!(all_votes, 3 + 5 + 7 + 11 + 2);
    assert_eq!(replaced, 5);
    assert_eq!(all_votes - replaced, 3 + 2 + 7 + 11);

    // The reconciled tally, recovered with the brute-force scan.
    let reconciled = Ciphertext::new(tally.c1 - overwrites.c1, tally.c2 - overwrites.c2);
    let partials = collect_partial_decryptions(&quorum, &reconciled.c1).await;
    let message = combine_partial_decryptions(&reconciled.c2, &partials, &ids).unwrap();
    let outcome = solve_brute_force(&message, &config.dlog.with_workers(2)).unwrap();
    assert_eq!(outcome.value, 3 + 2 + 7 + 11);
    assert!(outcome.scanned >= outcome.value + 1);
}

#[tokio::test]
async fn quorums_agree() {
    let (participants, public_key) = make_key_shares::<P>(&mut OsRng, 2, 4).unwrap();
    let config = config(DiscreteLogStrategy::BruteForce);

    let ciphertext: Ciphertext<P> = (0..20).map(|_| public_key.encrypt(&mut OsRng, 9)).sum();

    for quorum in [&participants[..2], &participants[1..3], &participants[2..]] {
        let ids = quorum.iter().map(|participant| participant.id()).collect::<Vec<_>>();
        let partials = collect_partial_decryptions(quorum, &ciphertext.c1).await;
        assert_eq!(decrypt(&ciphertext, &partials, &ids, &config.dlog), Ok(180));
    }
}

#[test_log::test]
fn tally_beyond_search_bound_is_unsolved() {
    let (participants, public_key) = make_key_shares::<P>(&mut OsRng, 1, 1).unwrap();
    let config = config(DiscreteLogStrategy::BabyStepGiantStep);

    let ciphertext = public_key.encrypt(&mut OsRng, 50_000);
    let partials = participants
        .iter()
        .map(|participant| (participant.id(), participant.compute_partial_decryption(&ciphertext.c1)))
        .collect::<BTreeMap<_, _>>();
    let ids = [participants[0].id()];
    assert_eq!(
        decrypt(&ciphertext, &partials, &ids, &config.dlog),
        Err(Error::DiscreteLogUnsolved)
    );
}

#[test_log::test]
fn serialized_ballots_survive_the_store() {
    let (_, public_key) = make_key_shares::<P>(&mut OsRng, 1, 1).unwrap();
    let ciphertext = public_key.encrypt(&mut OsRng, 4);

    let json = serde_json::to_string(&ciphertext).unwrap();
    let restored: Ciphertext<P> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, ciphertext);
    assert_eq!(Ciphertext::<P>::try_from_bytes(&ciphertext.to_bytes()), Ok(ciphertext));
}

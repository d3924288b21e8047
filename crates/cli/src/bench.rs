//! Load generator.
//!
//! `parallel` clients each run `cycle` rounds of a search followed by the
//! chosen write workload. Every call produces one JSON line on stdout (and
//! in `OUT/NAME_PARALLEL` when an output directory is given), then a
//! per-kind summary is logged.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use rand::Rng;
use seqdb_core::Record;
use seqdb_server::{Client, ClientError};
use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cli::{BenchArgs, BenchMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Read,
    Write,
}

/// One timed call
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub worker: usize,
    pub method: BenchMethod,
    pub kind: Kind,
    /// False if the server rejected the call
    pub ok: bool,
    /// Seconds
    pub elapsed: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub count: u64,
    pub total: f64,
    pub max: f64,
}

impl Stats {
    pub fn record(&mut self, elapsed: f64) {
        self.count += 1;
        self.total += elapsed;
        if elapsed > self.max {
            self.max = elapsed;
        }
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub read: Stats,
    pub write: Stats,
    /// Calls the server rejected; kept out of the latency stats
    pub rejected: u64,
    pub failed_workers: usize,
}

impl Summary {
    fn record(&mut self, sample: &Sample) {
        if !sample.ok {
            self.rejected += 1;
            return;
        }
        match sample.kind {
            Kind::Read => self.read.record(sample.elapsed),
            Kind::Write => self.write.record(sample.elapsed),
        }
    }
}

struct Worker {
    id: usize,
    run_id: Uuid,
    method: BenchMethod,
    query: i32,
    value: i32,
    tx: mpsc::UnboundedSender<Sample>,
}

impl Worker {
    fn emit(&self, kind: Kind, started: Instant, ok: bool) {
        let sample = Sample {
            run_id: self.run_id,
            timestamp: Utc::now(),
            worker: self.id,
            method: self.method,
            kind,
            ok,
            elapsed: started.elapsed().as_secs_f64(),
        };
        // The collector only goes away once every worker has finished
        let _ = self.tx.send(sample);
    }

    async fn run(self, addr: String, cycles: usize) -> anyhow::Result<()> {
        let mut client = Client::connect(addr.as_str())
            .await
            .with_context(|| format!("worker {} failed to connect to {}", self.id, addr))?;

        for _ in 0..cycles {
            let started = Instant::now();
            let found = client.search(self.query).await?;
            self.emit(Kind::Read, started, true);

            match self.method {
                BenchMethod::Add => {
                    let started = Instant::now();
                    client.add(vec![self.value]).await?;
                    self.emit(Kind::Write, started, true);
                }
                BenchMethod::Update => {
                    let records: Vec<Record> = found
                        .iter()
                        .map(|r| Record::new(r.index, self.value))
                        .collect();
                    let started = Instant::now();
                    client.update(records).await?;
                    self.emit(Kind::Write, started, true);
                }
                BenchMethod::Delete => {
                    let values = found.iter().map(|r| r.value).collect();
                    let started = Instant::now();
                    client.add(values).await?;
                    self.emit(Kind::Write, started, true);

                    // Appends land past every found index, so they stay valid
                    // unless another worker deleted in between
                    let indexes = found.iter().map(|r| r.index).collect();
                    let started = Instant::now();
                    let ok = match client.delete(indexes).await {
                        Ok(()) => true,
                        Err(err @ ClientError::Remote { .. }) => {
                            warn!(worker = self.id, error = %err, "delete rejected");
                            false
                        }
                        Err(err) => return Err(err.into()),
                    };
                    self.emit(Kind::Write, started, ok);
                }
            }
        }
        Ok(())
    }
}

fn output_path(args: &BenchArgs) -> Option<PathBuf> {
    args.out
        .as_ref()
        .map(|dir| dir.join(format!("{}_{}", args.name, args.parallel)))
}

/// Run the workload and return per-kind statistics
pub async fn run(args: BenchArgs) -> anyhow::Result<Summary> {
    anyhow::ensure!(args.parallel > 0, "parallel must be at least 1");
    anyhow::ensure!(args.range >= 0, "range must not be negative");

    let run_id = Uuid::new_v4();
    let mut file = match output_path(&args) {
        Some(path) => {
            if let Some(dir) = path.parent() {
                tokio::fs::create_dir_all(dir).await?;
            }
            let file = File::create(&path)
                .await
                .with_context(|| format!("failed to create {}", path.display()))?;
            info!(path = %path.display(), "writing samples");
            Some(BufWriter::new(file))
        }
        None => None,
    };

    info!(
        %run_id,
        method = ?args.method,
        parallel = args.parallel,
        cycle = args.cycle,
        "bench started"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut handles = Vec::with_capacity(args.parallel);
    {
        let mut rng = rand::thread_rng();
        for id in 0..args.parallel {
            let worker = Worker {
                id,
                run_id,
                method: args.method,
                query: rng.gen_range(0..=args.range),
                value: rng.gen_range(0..=args.range),
                tx: tx.clone(),
            };
            handles.push(tokio::spawn(worker.run(args.conn.addr.clone(), args.cycle)));
        }
    }
    drop(tx);

    let mut summary = Summary::default();
    let mut stdout = tokio::io::stdout();
    while let Some(sample) = rx.recv().await {
        summary.record(&sample);
        let mut line = serde_json::to_vec(&sample)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        if let Some(file) = file.as_mut() {
            file.write_all(&line).await?;
        }
    }
    stdout.flush().await?;
    if let Some(file) = file.as_mut() {
        file.flush().await?;
    }

    for handle in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(error = %err, "worker failed");
                summary.failed_workers += 1;
            }
            Err(err) => {
                warn!(error = %err, "worker panicked");
                summary.failed_workers += 1;
            }
        }
    }

    info!(
        %run_id,
        reads = summary.read.count,
        read_mean = summary.read.mean(),
        read_max = summary.read.max,
        writes = summary.write.count,
        write_mean = summary.write.mean(),
        write_max = summary.write.max,
        rejected = summary.rejected,
        failed_workers = summary.failed_workers,
        "bench finished"
    );
    Ok(summary)
}

// src/services/fanout.rs

use std::future::Future;

use tokio::task::JoinSet;

use crate::common::error::AppError;

/// Dispara uma leitura independente por chave, todas ao mesmo tempo, e
/// devolve os resultados na ordem original das chaves.
///
/// A primeira falha interrompe tudo: o JoinSet é descartado e as leituras
/// que ainda estavam em andamento são abortadas (sem resultado parcial).
pub async fn fan_out<K, T, F, Fut>(keys: Vec<K>, fetch: F) -> Result<Vec<(K, T)>, AppError>
where
    K: Send + 'static,
    T: Send + 'static,
    F: Fn(&K) -> Fut,
    Fut: Future<Output = Result<T, AppError>> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for (position, key) in keys.into_iter().enumerate() {
        let request = fetch(&key);
        tasks.spawn(async move { (position, key, request.await) });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (position, key, outcome) =
            joined.map_err(|e| anyhow::anyhow!("Falha na task de leitura: {}", e))?;
        results.push((position, key, outcome?));
    }

    results.sort_by_key(|(position, _, _)| *position);
    Ok(results.into_iter().map(|(_, key, value)| (key, value)).collect())
}

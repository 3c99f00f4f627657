use temple_backend::run;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    run().await;
}

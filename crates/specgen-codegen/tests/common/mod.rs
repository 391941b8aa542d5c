//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_json::json;
use specgen_core::Spec;

/// A spec touching every request and response shape.
pub fn shop_spec() -> Spec {
    serde_json::from_value(json!({
        "name": "shop",
        "versions": [{
            "name": "v1",
            "apis": [
                {
                    "name": "orders",
                    "operations": [
                        {
                            "name": "get_order",
                            "description": "Fetches one order.",
                            "endpoint": {
                                "method": "GET",
                                "url": "/orders/{id}",
                                "url_params": [{ "name": "id", "type": "uuid" }]
                            },
                            "header_params": [{ "name": "X-Request-Id", "type": "string?" }],
                            "responses": [
                                { "status": "ok", "body": { "json": "Order" } },
                                { "status": "not_found" }
                            ]
                        },
                        {
                            "name": "list_orders",
                            "endpoint": { "method": "GET", "url": "/orders" },
                            "query_params": [
                                { "name": "status", "type": "OrderStatus?" },
                                { "name": "placed_after", "type": "date?" },
                                { "name": "limit", "type": "int", "default": "20" }
                            ],
                            "responses": [{ "status": "ok", "body": { "json": "Order[]" } }]
                        },
                        {
                            "name": "create_order",
                            "endpoint": { "method": "POST", "url": "/orders" },
                            "body": { "json": { "type": "NewOrder" } },
                            "responses": [
                                { "status": "created", "body": { "json": "Order" } },
                                { "status": "conflict" }
                            ]
                        },
                        {
                            "name": "delete_order",
                            "endpoint": {
                                "method": "DELETE",
                                "url": "/orders/{id}",
                                "url_params": [{ "name": "id", "type": "uuid" }]
                            },
                            "responses": [{ "status": "no_content" }]
                        }
                    ]
                },
                {
                    "name": "uploads",
                    "operations": [
                        {
                            "name": "upload_invoice",
                            "endpoint": { "method": "POST", "url": "/uploads/invoice" },
                            "body": { "form_data": { "params": [
                                { "name": "order_id", "type": "uuid" },
                                { "name": "note", "type": "string?" }
                            ] } },
                            "responses": [{ "status": "ok", "body": "raw_string" }]
                        },
                        {
                            "name": "add_note",
                            "endpoint": { "method": "POST", "url": "/uploads/note" },
                            "body": { "raw_string": {} },
                            "responses": [{ "status": "accepted" }]
                        }
                    ]
                }
            ],
            "models": [
                {
                    "name": "Order",
                    "kind": { "object": { "fields": [
                        { "name": "id", "type": "uuid" },
                        { "name": "status", "type": "OrderStatus" },
                        { "name": "total", "type": "decimal" },
                        { "name": "placedAt", "type": "datetime" },
                        { "name": "lines", "type": "OrderLine[]" }
                    ] } }
                },
                {
                    "name": "OrderLine",
                    "kind": { "object": { "fields": [
                        { "name": "sku", "type": "string" },
                        { "name": "quantity", "type": "int" }
                    ] } }
                },
                {
                    "name": "NewOrder",
                    "kind": { "object": { "fields": [
                        { "name": "lines", "type": "OrderLine[]" },
                        { "name": "attributes", "type": "string{}" }
                    ] } }
                },
                {
                    "name": "OrderStatus",
                    "kind": { "enum": { "values": [
                        { "value": "pending" },
                        { "value": "shipped" }
                    ] } }
                }
            ]
        }],
        "http_errors": {
            "responses": [{ "status": "forbidden", "type": "ForbiddenError" }],
            "models": [{
                "name": "ForbiddenError",
                "kind": { "object": { "fields": [{ "name": "reason", "type": "string" }] } }
            }]
        }
    }))
    .expect("fixture spec is valid")
}
